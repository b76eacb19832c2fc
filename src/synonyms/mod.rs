//! Synonyms Lambda: dictionary and context-aware synonym suggestions

pub mod datamuse;
pub mod handler;
pub mod language;

pub use datamuse::DatamuseClient;
pub use handler::handler;
pub use language::detect_language;
