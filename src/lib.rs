//! Synapse - serverless helpers behind the Synapse text editor.
//!
//! This crate implements two independent AWS Lambda functions:
//! 1. An Export Lambda that renders text plus its replacement history into a
//!    PDF or DOCX document and returns it base64-encoded
//! 2. A Synonyms Lambda that suggests synonyms for a word, from Datamuse and,
//!    when context and an `OpenAI` key are available, from a language model
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda behind API Gateway proxy events
//! - printpdf and docx-rs for rich documents, with a plain-text fallback
//! - reqwest for the Datamuse and `OpenAI` HTTP APIs
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use synapse::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     synapse::setup_logging();
//!
//!     let config = AppConfig::default();
//!     let event = json!({
//!         "httpMethod": "POST",
//!         "body": json!({ "word": "happy", "lang": "en" }).to_string()
//!     });
//!     let response = synapse::synonyms::handler::handle_request(&config, &event).await;
//!     println!("{}", response["body"]);
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod export;
pub mod synonyms;

pub use errors::SynapseError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`).
/// Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// synapse::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
