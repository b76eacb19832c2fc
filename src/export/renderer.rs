//! Document renderers and the once-per-process capability probe.
//!
//! Each format has a rich renderer gated behind a Cargo feature. When the
//! feature is compiled out, or the renderer declines at probe time, the
//! format is served by [`PlainTextRenderer`] instead.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use tracing::info;

use super::format::ExportFormat;
use crate::core::models::Replacement;
use crate::errors::SynapseError;

pub const DOCUMENT_TITLE: &str = "Synapse - Exported Document";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a renderer needs to produce one export.
#[derive(Debug, Clone)]
pub struct ExportDocument<'a> {
    pub title: &'a str,
    pub generated_at: NaiveDateTime,
    pub text: &'a str,
    pub replacements: &'a [Replacement],
}

impl<'a> ExportDocument<'a> {
    #[must_use]
    pub fn new(text: &'a str, replacements: &'a [Replacement], generated_at: NaiveDateTime) -> Self {
        Self {
            title: DOCUMENT_TITLE,
            generated_at,
            text,
            replacements,
        }
    }

    /// Body lines with blank ones dropped.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<&'a str> {
        self.text
            .split('\n')
            .filter(|p| !p.trim().is_empty())
            .collect()
    }

    #[must_use]
    pub fn generated_label(&self) -> String {
        format!("Generated: {}", self.generated_at.format(TIMESTAMP_FORMAT))
    }
}

pub trait DocumentRenderer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns `RenderError` if the underlying library fails to produce bytes.
    fn render(&self, doc: &ExportDocument<'_>) -> Result<Vec<u8>, SynapseError>;
}

/// Flat UTF-8 text used when no rich renderer is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<Vec<u8>, SynapseError> {
        let mut content = format!(
            "{}\n{}\n\nMAIN TEXT:\n{}\n\n",
            doc.title.to_uppercase(),
            doc.generated_label(),
            doc.text
        );

        if !doc.replacements.is_empty() {
            content.push_str("\nREPLACEMENT HISTORY:\n");
            for rep in doc.replacements {
                content.push_str(&format!(
                    "  {} → {} ({})\n",
                    rep.original, rep.replacement, rep.timestamp
                ));
            }
        }

        Ok(content.into_bytes())
    }
}

/// The renderer chosen for each format.
pub struct Renderers {
    pdf: Box<dyn DocumentRenderer>,
    docx: Box<dyn DocumentRenderer>,
}

impl Renderers {
    /// Probes the rich renderers and falls back to plain text where absent.
    #[must_use]
    pub fn probe() -> Self {
        let renderers = Self {
            pdf: probe_pdf().unwrap_or_else(|| Box::new(PlainTextRenderer)),
            docx: probe_docx().unwrap_or_else(|| Box::new(PlainTextRenderer)),
        };
        info!(
            pdf = renderers.pdf.name(),
            docx = renderers.docx.name(),
            "Export renderers selected"
        );
        renderers
    }

    #[must_use]
    pub fn plain_text() -> Self {
        Self {
            pdf: Box::new(PlainTextRenderer),
            docx: Box::new(PlainTextRenderer),
        }
    }

    #[must_use]
    pub fn for_format(&self, format: ExportFormat) -> &dyn DocumentRenderer {
        match format {
            ExportFormat::Pdf => self.pdf.as_ref(),
            ExportFormat::Docx => self.docx.as_ref(),
        }
    }
}

static RENDERERS: Lazy<Renderers> = Lazy::new(Renderers::probe);

/// Process-wide renderer selection, probed on first use.
pub fn renderers() -> &'static Renderers {
    &RENDERERS
}

#[cfg(feature = "pdf")]
fn probe_pdf() -> Option<Box<dyn DocumentRenderer>> {
    super::pdf::PdfRenderer::probe().map(|r| Box::new(r) as Box<dyn DocumentRenderer>)
}

#[cfg(not(feature = "pdf"))]
fn probe_pdf() -> Option<Box<dyn DocumentRenderer>> {
    None
}

#[cfg(feature = "docx")]
fn probe_docx() -> Option<Box<dyn DocumentRenderer>> {
    super::docx::DocxRenderer::probe().map(|r| Box::new(r) as Box<dyn DocumentRenderer>)
}

#[cfg(not(feature = "docx"))]
fn probe_docx() -> Option<Box<dyn DocumentRenderer>> {
    None
}
