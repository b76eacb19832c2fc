use chrono::NaiveDateTime;

use crate::errors::SynapseError;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Parses the requested format, defaulting to PDF when none was sent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for anything other than `pdf` or `docx`.
    pub fn parse(raw: Option<&str>) -> Result<Self, SynapseError> {
        match raw.map(str::to_lowercase).as_deref() {
            None | Some("pdf") => Ok(ExportFormat::Pdf),
            Some("docx") => Ok(ExportFormat::Docx),
            Some(_) => Err(SynapseError::InvalidRequest(
                "Invalid format. Use pdf or docx".to_string(),
            )),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// MIME type registered for the format's extension.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        mime_guess::from_ext(self.extension())
            .first_raw()
            .unwrap_or(OCTET_STREAM)
    }

    /// `synapse-export-YYYYMMDD-HHMMSS.<ext>`
    #[must_use]
    pub fn filename(self, now: &NaiveDateTime) -> String {
        format!(
            "synapse-export-{}.{}",
            now.format("%Y%m%d-%H%M%S"),
            self.extension()
        )
    }
}
