pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::ApiError;

pub use http::{HttpApi, DEFAULT_BASE_URL};
pub use types::{
    Mode, PdfUpload, RagAnswer, RagBackend, RagRequest, Scope, SearchMatch, SearchRequest,
    RAG_SCORE_THRESHOLD, RAG_TOP_K, SEARCH_TOP_K,
};

/// SapiRAG server API - abstraction over the remote REST endpoints.
///
/// Workspace arguments are always canonical (unprefixed) except for
/// `create_bucket`, which takes the full bucket name.
#[async_trait]
pub trait SapiRagApi: Send + Sync {
    /// List workspace buckets (display form)
    async fn list_buckets(&self) -> Result<Vec<String>, ApiError>;

    /// Create a bucket; returns the server message, if any
    async fn create_bucket(&self, bucket: &str) -> Result<Option<String>, ApiError>;

    async fn delete_workspace(&self, workspace: &str) -> Result<Option<String>, ApiError>;

    async fn list_pdfs(&self, workspace: &str) -> Result<Vec<String>, ApiError>;

    /// Upload a PDF; returns the filename the server stored it under
    async fn upload_pdf(&self, file: PdfUpload, workspace: &str)
        -> Result<Option<String>, ApiError>;

    async fn delete_pdf(&self, workspace: &str, filename: &str)
        -> Result<Option<String>, ApiError>;

    /// Ask the server to extract and embed an uploaded PDF
    async fn generate_embeddings(
        &self,
        filename: &str,
        workspace: &str,
    ) -> Result<Option<String>, ApiError>;

    async fn search(
        &self,
        mode: Mode,
        request: &SearchRequest,
    ) -> Result<Vec<SearchMatch>, ApiError>;

    async fn ask(&self, request: &RagRequest) -> Result<RagAnswer, ApiError>;
}
