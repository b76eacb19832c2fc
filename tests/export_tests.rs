use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use synapse::export::handler::handle_request;
use synapse::export::{Renderers, renderers};

fn post(body: &Value) -> Value {
    json!({ "httpMethod": "POST", "body": body.to_string() })
}

fn body_of(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("body is a string"))
        .expect("body is JSON")
}

fn decoded_len(response: &Value) -> usize {
    let body = body_of(response);
    let bytes = STANDARD
        .decode(body["content"].as_str().unwrap())
        .expect("content is base64");
    assert_eq!(body["size"].as_u64().unwrap() as usize, bytes.len());
    bytes.len()
}

#[test]
fn test_empty_text_is_rejected_for_every_format() {
    for format in ["pdf", "docx", "txt"] {
        let response = handle_request(renderers(), &post(&json!({ "text": "", "format": format })));
        assert_eq!(response["statusCode"], 400, "format {format}");
        assert_eq!(body_of(&response)["error"], "Text is required");
    }

    let response = handle_request(renderers(), &post(&json!({})));
    assert_eq!(response["statusCode"], 400);
}

#[test]
fn test_unsupported_format_is_rejected() {
    let response = handle_request(renderers(), &post(&json!({ "text": "hi", "format": "txt" })));
    assert_eq!(response["statusCode"], 400);
    assert_eq!(body_of(&response)["error"], "Invalid format. Use pdf or docx");
}

#[test]
fn test_pdf_export_without_replacements() {
    let response = handle_request(
        renderers(),
        &post(&json!({ "text": "Hello world\nSecond paragraph" })),
    );
    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["headers"]["Access-Control-Allow-Origin"], "*");

    let body = body_of(&response);
    assert_eq!(body["contentType"], "application/pdf");
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("synapse-export-") && filename.ends_with(".pdf"));
    assert!(decoded_len(&response) > 0);
}

#[test]
fn test_russian_pdf_embeds_a_unicode_font() {
    let response = handle_request(
        renderers(),
        &post(&json!({
            "text": "Он был радостный весь день → ok",
            "format": "pdf",
            "replacements": [
                { "original": "радостный", "replacement": "весёлый", "timestamp": "10:00" }
            ]
        })),
    );
    assert_eq!(response["statusCode"], 200);

    let bytes = STANDARD
        .decode(body_of(&response)["content"].as_str().unwrap())
        .unwrap();
    let pdf = String::from_utf8_lossy(&bytes);
    assert!(pdf.contains("Identity-H"));
    assert!(!pdf.contains("WinAnsiEncoding"));
    // the body line is shown as two-byte glyph ids, never as Latin-1 spaces
    assert!(!pdf.contains("<2020202020206F6B> Tj"));
}

#[test]
fn test_pdf_with_oversized_replacement_succeeds() {
    let response = handle_request(
        renderers(),
        &post(&json!({
            "text": "short body",
            "replacements": [
                { "original": "x ".repeat(20000), "replacement": "y", "timestamp": "t" }
            ]
        })),
    );
    assert_eq!(response["statusCode"], 200);
    assert_eq!(body_of(&response)["contentType"], "application/pdf");
}

#[test]
fn test_docx_replacement_table_adds_bytes() {
    let text = "The weather was nice.\nWe had a good time.";
    let replacements = json!([
        { "original": "nice", "replacement": "pleasant", "timestamp": "2024-04-01T10:00:00Z" },
        { "original": "good", "replacement": "wonderful", "timestamp": "2024-04-01T10:01:00Z" }
    ]);

    let with = handle_request(
        renderers(),
        &post(&json!({ "text": text, "format": "DOCX", "replacements": replacements })),
    );
    let without = handle_request(
        renderers(),
        &post(&json!({ "text": text, "format": "docx", "replacements": [] })),
    );

    assert_eq!(with["statusCode"], 200);
    assert_eq!(without["statusCode"], 200);
    assert_eq!(
        body_of(&with)["contentType"],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert!(decoded_len(&with) > decoded_len(&without));
}

#[test]
fn test_plain_text_renderers_degrade_gracefully() {
    let response = handle_request(
        &Renderers::plain_text(),
        &post(&json!({
            "text": "Body",
            "format": "pdf",
            "replacements": [{ "original": "a", "replacement": "b", "timestamp": "t" }]
        })),
    );
    assert_eq!(response["statusCode"], 200);

    let body = body_of(&response);
    assert_eq!(body["contentType"], "application/pdf");
    let text = String::from_utf8(STANDARD.decode(body["content"].as_str().unwrap()).unwrap()).unwrap();
    assert!(text.starts_with("SYNAPSE - EXPORTED DOCUMENT\nGenerated: "));
    assert!(text.contains("MAIN TEXT:\nBody\n"));
    assert!(text.contains("  a → b (t)\n"));
}

#[test]
fn test_options_returns_preflight() {
    let response = handle_request(renderers(), &json!({ "httpMethod": "OPTIONS" }));
    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "");
    assert_eq!(
        response["headers"]["Access-Control-Allow-Methods"],
        "POST, OPTIONS"
    );
}

#[test]
fn test_other_methods_are_not_allowed() {
    let response = handle_request(renderers(), &json!({ "httpMethod": "GET" }));
    assert_eq!(response["statusCode"], 405);
    assert_eq!(body_of(&response)["error"], "Method not allowed");
}

#[test]
fn test_http_api_v2_event_and_base64_body() {
    let event = json!({
        "requestContext": { "http": { "method": "POST" } },
        "body": STANDARD.encode(json!({ "text": "encoded body" }).to_string()),
        "isBase64Encoded": true
    });
    let response = handle_request(renderers(), &event);
    assert_eq!(response["statusCode"], 200);
}

#[test]
fn test_malformed_json_is_bad_request() {
    let event = json!({ "httpMethod": "POST", "body": "{\"text\": " });
    let response = handle_request(renderers(), &event);
    assert_eq!(response["statusCode"], 400);
}
