use std::env;
use std::time::Duration;

use url::Url;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_DATAMUSE_BASE_URL: &str = "https://api.datamuse.com";

/// Fixed per-call timeouts for the two outbound lookups.
pub const DATAMUSE_TIMEOUT: Duration = Duration::from_secs(5);
pub const OPENAI_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Url,
    pub datamuse_base_url: Url,
    pub datamuse_timeout: Duration,
    pub openai_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_org_id: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: Url::parse(DEFAULT_OPENAI_BASE_URL).expect("static url"),
            datamuse_base_url: Url::parse(DEFAULT_DATAMUSE_BASE_URL).expect("static url"),
            datamuse_timeout: DATAMUSE_TIMEOUT,
            openai_timeout: OPENAI_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_org_id: non_empty_var("OPENAI_ORG_ID"),
            openai_model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: url_var("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)?,
            datamuse_base_url: url_var("DATAMUSE_BASE_URL", DEFAULT_DATAMUSE_BASE_URL)?,
            datamuse_timeout: DATAMUSE_TIMEOUT,
            openai_timeout: OPENAI_TIMEOUT,
        })
    }

    /// Contextual lookups only run when a credential is present.
    #[must_use]
    pub fn has_openai_credential(&self) -> bool {
        self.openai_api_key.is_some()
    }

    #[must_use]
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_openai_base_url(mut self, url: Url) -> Self {
        self.openai_base_url = url;
        self
    }

    #[must_use]
    pub fn with_datamuse_base_url(mut self, url: Url) -> Self {
        self.datamuse_base_url = url;
        self
    }

    #[must_use]
    pub fn with_datamuse_timeout(mut self, timeout: Duration) -> Self {
        self.datamuse_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_openai_timeout(mut self, timeout: Duration) -> Self {
        self.openai_timeout = timeout;
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn url_var(name: &str, default: &str) -> Result<Url, String> {
    let raw = non_empty_var(name).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| format!("{}: {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_apis() {
        let config = AppConfig::default();
        assert_eq!(config.openai_model, "gpt-3.5-turbo");
        assert_eq!(config.datamuse_base_url.host_str(), Some("api.datamuse.com"));
        assert_eq!(config.datamuse_timeout, Duration::from_secs(5));
        assert_eq!(config.openai_timeout, Duration::from_secs(10));
        assert!(!config.has_openai_credential());
    }

    #[test]
    fn url_var_rejects_garbage() {
        let err = url_var("SYNAPSE_TEST_NEVER_SET_URL", "not a url").unwrap_err();
        assert!(err.starts_with("SYNAPSE_TEST_NEVER_SET_URL:"));
    }

    #[test]
    fn builders_override_fields() {
        let config = AppConfig::default()
            .with_openai_api_key("sk-test")
            .with_datamuse_base_url(Url::parse("http://127.0.0.1:9").unwrap())
            .with_datamuse_timeout(Duration::from_millis(100))
            .with_openai_timeout(Duration::from_millis(200));
        assert!(config.has_openai_credential());
        assert_eq!(config.datamuse_base_url.port(), Some(9));
        assert_eq!(config.datamuse_timeout, Duration::from_millis(100));
        assert_eq!(config.openai_timeout, Duration::from_millis(200));
    }
}
