//! Export Lambda handler.
//!
//! Accepts `{text, replacements?, format?}` and answers with the rendered
//! document base64-encoded in `{filename, content, contentType, size}`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Local, NaiveDateTime};
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::format::ExportFormat;
use super::renderer::{ExportDocument, Renderers, renderers};
use crate::api::{helpers, parsing};
use crate::core::models::{ExportPayload, ExportRequest};
use crate::errors::SynapseError;

pub use self::function_handler as handler;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Lambda handler for the export entrypoint.
///
/// # Errors
///
/// Never fails on bad input; every outcome is encoded in the returned
/// response payload.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<impl Serialize, Error> {
    Ok(handle_request(renderers(), &event.payload))
}

/// Routes one proxy event by method.
#[must_use]
pub fn handle_request(renderers: &Renderers, payload: &Value) -> Value {
    let method = parsing::request_method(payload, "POST");
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, method = %method, "Export request received");

    match method.as_str() {
        "OPTIONS" => helpers::preflight(ALLOWED_METHODS),
        "POST" => match export(renderers, payload, Local::now().naive_local()) {
            Ok(result) => {
                info!(
                    %correlation_id,
                    filename = %result.filename,
                    size = result.size,
                    "Export rendered"
                );
                helpers::ok_json(&result)
            }
            Err(e) => {
                if e.status_code() >= 500 {
                    error!(%correlation_id, "Export failed: {}", e);
                } else {
                    info!(%correlation_id, "Export rejected: {}", e);
                }
                helpers::error_to_response(&e)
            }
        },
        _ => helpers::method_not_allowed(),
    }
}

fn export(
    renderers: &Renderers,
    payload: &Value,
    now: NaiveDateTime,
) -> Result<ExportPayload, SynapseError> {
    let request: ExportRequest = parsing::parse_json_body(payload)?;
    build_export(renderers, &request, now)
}

/// Validates the request, renders it and wraps the bytes for transport.
///
/// # Errors
///
/// `InvalidRequest` for empty text or an unknown format; `RenderError` when
/// the selected renderer fails.
pub fn build_export(
    renderers: &Renderers,
    request: &ExportRequest,
    now: NaiveDateTime,
) -> Result<ExportPayload, SynapseError> {
    let text = request.text.as_deref().unwrap_or_default();
    if text.is_empty() {
        return Err(SynapseError::InvalidRequest("Text is required".to_string()));
    }

    let format = ExportFormat::parse(request.format.as_deref())?;
    let replacements = request.replacements.as_deref().unwrap_or_default();
    let renderer = renderers.for_format(format);

    info!(
        format = format.extension(),
        renderer = renderer.name(),
        replacements = replacements.len(),
        "Rendering export"
    );

    let document = ExportDocument::new(text, replacements, now);
    let bytes = renderer.render(&document)?;

    Ok(ExportPayload {
        filename: format.filename(&now),
        content: STANDARD.encode(&bytes),
        content_type: format.content_type().to_string(),
        size: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Replacement;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_opt(23, 59, 58))
            .unwrap()
    }

    #[test]
    fn plain_text_fallback_keeps_format_metadata() {
        let request = ExportRequest {
            text: Some("Body".into()),
            replacements: Some(vec![Replacement::default()]),
            format: Some("DOCX".into()),
        };
        let payload = build_export(&Renderers::plain_text(), &request, now()).unwrap();
        assert_eq!(payload.filename, "synapse-export-20240229-235958.docx");
        assert_eq!(
            payload.content_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        let decoded = STANDARD.decode(&payload.content).unwrap();
        assert_eq!(decoded.len(), payload.size);
        assert!(String::from_utf8(decoded).unwrap().contains("REPLACEMENT HISTORY"));
    }

    #[test]
    fn empty_text_checked_before_format() {
        let request = ExportRequest {
            text: Some(String::new()),
            replacements: None,
            format: Some("txt".into()),
        };
        let err = build_export(&Renderers::plain_text(), &request, now()).unwrap_err();
        assert_eq!(err.to_string(), "Text is required");
    }

    #[test]
    fn put_is_not_allowed() {
        let v = handle_request(&Renderers::plain_text(), &json!({"httpMethod": "PUT"}));
        assert_eq!(v["statusCode"], 405);
    }
}
