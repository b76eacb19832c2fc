//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the chat-completions call used for contextual synonyms.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;
use url::Url;

use super::prompt_builder::{build_contextual_prompt, parse_contextual_reply};
use crate::core::config::AppConfig;
use crate::core::models::SynonymCandidate;
use crate::errors::SynapseError;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 300;

/// LLM API client for contextual synonyms
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: Url,
    timeout: Duration,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: String, base_url: Url) -> Self {
        Self {
            api_key,
            org_id,
            model_name,
            base_url,
            timeout: crate::core::config::OPENAI_TIMEOUT,
        }
    }

    /// Builds a client from the configured credential and endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, SynapseError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| SynapseError::ConfigError("OPENAI_API_KEY is not set".to_string()))?;
        let mut client = Self::new(
            api_key,
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        );
        client.timeout = config.openai_timeout;
        Ok(client)
    }

    pub fn build_prompt(&self, word: &str, context: &str, lang: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(build_contextual_prompt(word, context, lang)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }]
    }

    fn request_body(&self, prompt: &[ChatCompletionMessage]) -> Value {
        let messages: Vec<Value> = prompt
            .iter()
            .filter_map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };
                match &msg.content {
                    Content::Text(text) => Some(json!({ "role": role_str, "content": text })),
                    Content::ImageUrl(_) => None,
                }
            })
            .collect();

        json!({
            "model": self.model_name,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        })
    }

    /// Sends `prompt` and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, times out, or the reply
    /// does not carry a message.
    pub async fn complete(&self, prompt: &[ChatCompletionMessage]) -> Result<String, SynapseError> {
        let url = self
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| SynapseError::ConfigError(format!("OpenAI base URL: {e}")))?;

        let client = Client::builder().timeout(self.timeout).build()?;
        let mut request = client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt));
        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SynapseError::HttpError(format!("OpenAI API request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynapseError::OpenAIError(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SynapseError::OpenAIError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        response_json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| SynapseError::OpenAIError("No text in response".to_string()))
    }

    /// Asks the model for synonyms of `word` that fit `context`.
    ///
    /// # Errors
    ///
    /// Transport failures and replies that are not JSON.
    pub async fn contextual_synonyms(
        &self,
        word: &str,
        context: &str,
        lang: &str,
    ) -> Result<Vec<SynonymCandidate>, SynapseError> {
        #[cfg(feature = "debug-logs")]
        info!("Using contextual prompt for {}: {:?}", word, self.build_prompt(word, context, lang));

        let prompt = self.build_prompt(word, context, lang);
        let reply = self.complete(&prompt).await?;
        let synonyms = parse_contextual_reply(&reply)?;

        info!(
            word = %word,
            model = %self.model_name,
            returned = synonyms.len(),
            "Contextual lookup complete"
        );
        Ok(synonyms)
    }
}
