use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of matches requested by every search.
pub const SEARCH_TOP_K: u32 = 10;
/// Number of passages the server feeds into answer generation.
pub const RAG_TOP_K: u32 = 4;
/// Minimum similarity score for semantic RAG passages.
pub const RAG_SCORE_THRESHOLD: f64 = 0.0;

/// Retrieval strategy, shared by search and question answering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Keyword,
    #[serde(rename = "embedding")]
    Semantic,
    Hybrid,
}

impl Mode {
    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Keyword => "keyword",
            Mode::Semantic => "embedding",
            Mode::Hybrid => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Keyword => "Keyword",
            Mode::Semantic => "Semantic",
            Mode::Hybrid => "Hybrid",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(Mode::Keyword),
            "semantic" | "embedding" => Ok(Mode::Semantic),
            "hybrid" => Ok(Mode::Hybrid),
            other => Err(format!(
                "unknown mode '{}' (expected keyword, semantic or hybrid)",
                other
            )),
        }
    }
}

/// Whether a search or question targets one file or the whole workspace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    File,
    Workspace,
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Scope::File),
            "workspace" | "all" => Ok(Scope::Workspace),
            other => Err(format!(
                "unknown scope '{}' (expected file or workspace)",
                other
            )),
        }
    }
}

/// Which answer-generation endpoint the server should use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RagBackend {
    /// `/rag/rag`, backed by a hosted model
    #[default]
    Hosted,
    /// `/rag/rag-ollama`, backed by a local model
    Local,
}

impl RagBackend {
    pub fn path(&self) -> &'static str {
        match self {
            RagBackend::Hosted => "/rag/rag",
            RagBackend::Local => "/rag/rag-ollama",
        }
    }
}

/// One ranked passage returned by a search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchMatch {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Fields shared by all three search endpoints
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: u32,
    pub workspace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Question-answering request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RagRequest {
    pub question: String,
    pub mode: Mode,
    pub top_k: u32,
    pub score_threshold: f64,
    pub workspace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Answer plus whatever provenance the backend reported
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RagAnswer {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub citations: Option<String>,
    #[serde(default)]
    pub used_chunks: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A local PDF ready for upload
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BucketsResponse {
    #[serde(default)]
    pub buckets: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PdfsResponse {
    #[serde(default)]
    pub pdfs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadResponse {
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

/// Decode a response body, treating missing fields or malformed JSON as empty
pub(crate) fn decode_or_default<T: DeserializeOwned + Default>(endpoint: &str, body: &[u8]) -> T {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(endpoint, error = %e, "Unexpected response body, using empty value");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(serde_json::to_value(Mode::Semantic).unwrap(), json!("embedding"));
        assert_eq!(serde_json::to_value(Mode::Keyword).unwrap(), json!("keyword"));
        assert_eq!("semantic".parse::<Mode>().unwrap(), Mode::Semantic);
        assert_eq!("HYBRID".parse::<Mode>().unwrap(), Mode::Hybrid);
        assert!("fuzzy".parse::<Mode>().is_err());
    }

    #[test]
    fn test_search_request_omits_missing_filename() {
        let req = SearchRequest {
            query: "q".into(),
            top_k: SEARCH_TOP_K,
            workspace: "legal".into(),
            filename: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"query": "q", "top_k": 10, "workspace": "legal"}));
    }

    #[test]
    fn test_rag_request_body() {
        let req = RagRequest {
            question: "who?".into(),
            mode: Mode::Semantic,
            top_k: RAG_TOP_K,
            score_threshold: RAG_SCORE_THRESHOLD,
            workspace: "hr".into(),
            filename: Some("a.pdf".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["mode"], "embedding");
        assert_eq!(value["top_k"], 4);
        assert_eq!(value["score_threshold"].as_f64(), Some(0.0));
        assert_eq!(value["filename"], "a.pdf");
    }

    #[test]
    fn test_missing_matches_decodes_empty() {
        let resp: MatchesResponse = decode_or_default("test", br#"{"detail": "nope"}"#);
        assert!(resp.matches.is_empty());

        let resp: MatchesResponse = decode_or_default("test", b"Internal Server Error");
        assert!(resp.matches.is_empty());
    }

    #[test]
    fn test_match_optional_fields() {
        let resp: MatchesResponse = decode_or_default(
            "test",
            br#"{"matches": [{"header": "Sec 4", "body": "...", "rank": 0.812}]}"#,
        );
        assert_eq!(resp.matches.len(), 1);
        assert_eq!(resp.matches[0].rank, Some(0.812));
        assert_eq!(resp.matches[0].score, None);
    }
}
