//! Export Lambda: text plus replacement history rendered as PDF or DOCX

#[cfg(feature = "docx")]
pub mod docx;
pub mod format;
pub mod handler;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod renderer;

pub use format::ExportFormat;
pub use handler::handler;
pub use renderer::{DocumentRenderer, PlainTextRenderer, Renderers, renderers};
