use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynapseError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Unexpected upstream response: {0}")]
    UpstreamError(String),

    #[error("Failed to render document: {0}")]
    RenderError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SynapseError {
    /// HTTP status code this error maps to in a handler response.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SynapseError::InvalidRequest(_) => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for SynapseError {
    fn from(error: reqwest::Error) -> Self {
        SynapseError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for SynapseError {
    fn from(error: serde_json::Error) -> Self {
        SynapseError::UpstreamError(error.to_string())
    }
}

impl From<base64::DecodeError> for SynapseError {
    fn from(error: base64::DecodeError) -> Self {
        SynapseError::InvalidRequest(format!("Invalid base64 body: {error}"))
    }
}

impl From<anyhow::Error> for SynapseError {
    fn from(error: anyhow::Error) -> Self {
        SynapseError::RenderError(error.to_string())
    }
}
