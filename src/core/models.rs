use serde::{Deserialize, Serialize};

/// One word substitution the user made in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Replacement {
    pub original: String,
    pub replacement: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynonymSource {
    Datamuse,
    Contextual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymCandidate {
    pub word: String,
    pub context: String,
    pub source: SynonymSource,
}

/// Body of `POST /export`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub replacements: Option<Vec<Replacement>>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub filename: String,
    pub content: String,
    pub content_type: String,
    pub size: usize,
}

/// Body of `POST /synonyms`.
#[derive(Debug, Default, Deserialize)]
pub struct SynonymRequest {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SynonymResponse {
    pub word: String,
    pub language: String,
    pub synonyms: Vec<SynonymCandidate>,
    pub count: usize,
}

impl SynonymResponse {
    #[must_use]
    pub fn new(word: String, language: String, synonyms: Vec<SynonymCandidate>) -> Self {
        let count = synonyms.len();
        Self {
            word,
            language,
            synonyms,
            count,
        }
    }
}
