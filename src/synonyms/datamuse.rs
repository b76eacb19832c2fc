//! Datamuse word-association API client (English only, no key required).

use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::{SynonymCandidate, SynonymSource};
use crate::errors::SynapseError;

/// Results requested from the API.
const REQUEST_MAX: &str = "10";
/// Results kept for the response.
pub const MAX_DATAMUSE_RESULTS: usize = 5;
pub const GENERAL_CONTEXT: &str = "general synonym";

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

pub struct DatamuseClient {
    base_url: Url,
    http: Client,
}

impl DatamuseClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, SynapseError> {
        let http = Client::builder().timeout(config.datamuse_timeout).build()?;
        Ok(Self {
            base_url: config.datamuse_base_url.clone(),
            http,
        })
    }

    fn words_url(&self, word: &str) -> Result<Url, SynapseError> {
        let mut url = self
            .base_url
            .join("words")
            .map_err(|e| SynapseError::ConfigError(format!("Datamuse base URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("rel_syn", word)
            .append_pair("max", REQUEST_MAX);
        Ok(url)
    }

    /// Context-free synonyms for `word`, at most [`MAX_DATAMUSE_RESULTS`].
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    pub async fn lookup(&self, word: &str) -> Result<Vec<SynonymCandidate>, SynapseError> {
        let url = self.words_url(word)?;
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SynapseError::UpstreamError(format!(
                "Datamuse returned {}",
                response.status()
            )));
        }

        let words: Vec<DatamuseWord> = response.json().await?;
        info!(word = %word, returned = words.len(), "Datamuse lookup complete");

        Ok(words
            .into_iter()
            .take(MAX_DATAMUSE_RESULTS)
            .map(|w| SynonymCandidate {
                word: w.word,
                context: GENERAL_CONTEXT.to_string(),
                source: SynonymSource::Datamuse,
            })
            .collect())
    }
}
