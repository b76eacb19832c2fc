//! Prompt construction and reply parsing for contextual synonym lookups.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::core::models::{SynonymCandidate, SynonymSource};
use crate::errors::SynapseError;

/// Characters of surrounding text forwarded to the model.
pub const MAX_CONTEXT_CHARS: usize = 200;

/// Number of suggestions requested from the model.
pub const CONTEXTUAL_SYNONYM_COUNT: usize = 5;

/// Human-readable language name for the prompt.
#[must_use]
pub fn language_name(lang: &str) -> &'static str {
    if lang == "ru" { "Russian" } else { "English" }
}

/// Drops control characters and hard-truncates the context.
#[must_use]
pub fn sanitize_context(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(MAX_CONTEXT_CHARS)
        .collect()
}

#[must_use]
pub fn build_contextual_prompt(word: &str, context: &str, lang: &str) -> String {
    format!(
        "Provide {count} contextual synonyms for the word \"{word}\" in this context: \"{context}...\"\n\
         Language: {language}\n\
         Return ONLY a JSON array of objects with \"word\" and \"context\" fields. No explanations.\n\
         Example: [{{\"word\": \"synonym1\", \"context\": \"brief context\"}}, ...]",
        count = CONTEXTUAL_SYNONYM_COUNT,
        context = sanitize_context(context),
        language = language_name(lang),
    )
}

/// Unwraps a reply the model fenced as a Markdown code block.
///
/// Keeps the text between the first pair of fences and drops a leading
/// `json` info string. Unfenced replies are returned trimmed.
#[must_use]
pub fn strip_code_fences(reply: &str) -> &str {
    static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)^```(?:json)?(.*?)(?:```|\z)").expect("static regex compile")
    });

    let trimmed = reply.trim();
    FENCE_RE
        .captures(trimmed)
        .and_then(|cap| cap.get(1))
        .map_or(trimmed, |m| m.as_str().trim())
}

/// Parses the model's JSON array into candidates tagged `contextual`.
///
/// A reply that is valid JSON but not an array yields no candidates, as do
/// entries lacking a string `word`.
///
/// # Errors
///
/// Returns `UpstreamError` when the reply is not JSON at all.
pub fn parse_contextual_reply(reply: &str) -> Result<Vec<SynonymCandidate>, SynapseError> {
    let parsed: Value = serde_json::from_str(strip_code_fences(reply))?;

    let Some(items) = parsed.as_array() else {
        warn!("Contextual reply was not a JSON array");
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let word = item.get("word")?.as_str()?;
            let context = item
                .get("context")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Some(SynonymCandidate {
                word: word.to_string(),
                context: context.to_string(),
                source: SynonymSource::Contextual,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_truncates_context_and_names_language() {
        let context = "x".repeat(500);
        let prompt = build_contextual_prompt("светлый", &context, "ru");
        assert!(prompt.contains(&format!("\"{}...\"", "x".repeat(200))));
        assert!(!prompt.contains(&"x".repeat(201)));
        assert!(prompt.contains("Language: Russian"));
        assert!(prompt.contains("[{\"word\": \"synonym1\""));
    }

    #[test]
    fn strip_fences_variants() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[2]\n```\ntrailing"), "[2]");
        assert_eq!(strip_code_fences("  [3]  "), "[3]");
        assert_eq!(strip_code_fences("```json [4]"), "[4]");
    }

    #[test]
    fn non_array_reply_is_empty() {
        assert!(parse_contextual_reply(r#"{"word":"x"}"#).unwrap().is_empty());
    }

    #[test]
    fn entries_without_word_are_skipped() {
        let reply = r#"[{"word":"bright","context":"light"},{"context":"no word"},"loose",{"word":7}]"#;
        let parsed = parse_contextual_reply(reply).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].word, "bright");
        assert_eq!(parsed[0].context, "light");
        assert_eq!(parsed[0].source, SynonymSource::Contextual);
    }

    #[test]
    fn malformed_reply_is_error() {
        assert!(parse_contextual_reply("Sure! Here are some synonyms").is_err());
    }
}
