//! Synonyms Lambda handler.
//!
//! Accepts `{word, context?, lang?}` and answers with
//! `{word, language, synonyms, count}`. Lookups against Datamuse and the
//! language model are enrichments: their failures shrink the result list
//! but never fail the request.

use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::datamuse::DatamuseClient;
use super::language::detect_language;
use crate::ai::LlmClient;
use crate::api::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::core::models::{SynonymCandidate, SynonymRequest, SynonymResponse};
use crate::errors::SynapseError;

pub use self::function_handler as handler;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Contexts of this many characters or fewer skip the model lookup.
pub const MIN_CONTEXT_CHARS: usize = 10;

/// Lambda handler for the synonyms entrypoint.
///
/// # Errors
///
/// Returns an error only when the environment configuration is invalid.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    Ok(handle_request(&config, &event.payload).await)
}

/// Routes one proxy event by method.
pub async fn handle_request(config: &AppConfig, payload: &Value) -> Value {
    let method = parsing::request_method(payload, "GET");
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, method = %method, "Synonyms request received");

    match method.as_str() {
        "OPTIONS" => helpers::preflight(ALLOWED_METHODS),
        "POST" => match lookup(config, payload).await {
            Ok(response) => {
                info!(
                    %correlation_id,
                    word = %response.word,
                    language = %response.language,
                    count = response.count,
                    "Synonyms resolved"
                );
                helpers::ok_json(&response)
            }
            Err(e) => {
                if e.status_code() >= 500 {
                    error!(%correlation_id, "Synonym lookup failed: {}", e);
                } else {
                    info!(%correlation_id, "Synonym request rejected: {}", e);
                }
                helpers::error_to_response(&e)
            }
        },
        _ => helpers::method_not_allowed(),
    }
}

async fn lookup(config: &AppConfig, payload: &Value) -> Result<SynonymResponse, SynapseError> {
    let request: SynonymRequest = parsing::parse_json_body(payload)?;

    let word = request.word.as_deref().unwrap_or_default().trim().to_lowercase();
    if word.is_empty() {
        return Err(SynapseError::InvalidRequest("Word is required".to_string()));
    }

    let language = request
        .lang
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map_or_else(|| detect_language(&word).to_string(), str::to_string);

    let context = request.context.as_deref().unwrap_or_default();
    let synonyms = collect_synonyms(config, &word, context, &language).await;

    Ok(SynonymResponse::new(word, language, synonyms))
}

/// Runs every applicable lookup and concatenates the results in order:
/// Datamuse first, then contextual suggestions. Duplicates are kept.
pub async fn collect_synonyms(
    config: &AppConfig,
    word: &str,
    context: &str,
    language: &str,
) -> Vec<SynonymCandidate> {
    let mut synonyms = Vec::new();

    if language == "en" {
        let result = match DatamuseClient::new(config) {
            Ok(client) => client.lookup(word).await,
            Err(e) => Err(e),
        };
        synonyms.extend(degrade_enrichment("datamuse", result));
    }

    if context.chars().count() > MIN_CONTEXT_CHARS {
        if config.has_openai_credential() {
            let result = match LlmClient::from_config(config) {
                Ok(llm) => llm.contextual_synonyms(word, context, language).await,
                Err(e) => Err(e),
            };
            synonyms.extend(degrade_enrichment("contextual", result));
        } else {
            info!("No OpenAI credential configured; skipping contextual lookup");
        }
    }

    synonyms
}

/// Turns a failed enrichment step into an empty contribution.
pub fn degrade_enrichment(
    step: &str,
    result: Result<Vec<SynonymCandidate>, SynapseError>,
) -> Vec<SynonymCandidate> {
    result.unwrap_or_else(|e| {
        warn!(step = %step, "Enrichment failed, continuing without it: {}", e);
        Vec::new()
    })
}
