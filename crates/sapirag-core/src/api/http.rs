use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use tracing::debug;

use super::types::*;
use super::SapiRagApi;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// reqwest-backed client for a running SapiRAG server
pub struct HttpApi {
    client: Client,
    base_url: String,
    rag_backend: RagBackend,
}

impl HttpApi {
    /// Build a client. Only the connect phase is bounded unless a request
    /// timeout is given.
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = ClientBuilder::new().connect_timeout(connect_timeout);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ApiError::Transport {
            endpoint: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            rag_backend: RagBackend::default(),
        })
    }

    pub fn with_rag_backend(mut self, backend: RagBackend) -> Self {
        self.rag_backend = backend;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        debug!(endpoint, "Sending request");

        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        debug!(endpoint, bytes = body.len(), "Response received");
        Ok(body.to_vec())
    }

    async fn send_for_message(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Option<String>, ApiError> {
        let body = self.send(endpoint, request).await?;
        let decoded: MessageResponse = decode_or_default(endpoint, &body);
        Ok(decoded.message)
    }
}

#[async_trait]
impl SapiRagApi for HttpApi {
    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        let endpoint = "/workspace/buckets";
        let body = self.send(endpoint, self.client.get(self.url(endpoint))).await?;
        let decoded: BucketsResponse = decode_or_default(endpoint, &body);
        Ok(decoded.buckets)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<Option<String>, ApiError> {
        let endpoint = "/workspace/create-bucket";
        let form = Form::new().text("name", bucket.to_string());
        self.send_for_message(endpoint, self.client.post(self.url(endpoint)).multipart(form))
            .await
    }

    async fn delete_workspace(&self, workspace: &str) -> Result<Option<String>, ApiError> {
        let endpoint = "/workspace/delete-workspace";
        let form = Form::new().text("name", workspace.to_string());
        self.send_for_message(endpoint, self.client.delete(self.url(endpoint)).multipart(form))
            .await
    }

    async fn list_pdfs(&self, workspace: &str) -> Result<Vec<String>, ApiError> {
        let endpoint = "/workspace/list-pdfs";
        let request = self
            .client
            .get(self.url(endpoint))
            .query(&[("workspace", workspace)]);
        let body = self.send(endpoint, request).await?;
        let decoded: PdfsResponse = decode_or_default(endpoint, &body);
        Ok(decoded.pdfs)
    }

    async fn upload_pdf(
        &self,
        file: PdfUpload,
        workspace: &str,
    ) -> Result<Option<String>, ApiError> {
        let endpoint = "/workspace/upload-pdf";
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("application/pdf")
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let form = Form::new()
            .part("file", part)
            .text("workspace", workspace.to_string());

        let body = self
            .send(endpoint, self.client.post(self.url(endpoint)).multipart(form))
            .await?;
        let decoded: UploadResponse = decode_or_default(endpoint, &body);
        Ok(decoded.filename)
    }

    async fn delete_pdf(
        &self,
        workspace: &str,
        filename: &str,
    ) -> Result<Option<String>, ApiError> {
        let endpoint = "/workspace/delete-pdf";
        let form = Form::new()
            .text("workspace", workspace.to_string())
            .text("filename", filename.to_string());
        self.send_for_message(endpoint, self.client.delete(self.url(endpoint)).multipart(form))
            .await
    }

    async fn generate_embeddings(
        &self,
        filename: &str,
        workspace: &str,
    ) -> Result<Option<String>, ApiError> {
        let endpoint = "/search/generate-embeddings";
        let form = Form::new()
            .text("filename", filename.to_string())
            .text("workspace", workspace.to_string());
        self.send_for_message(endpoint, self.client.post(self.url(endpoint)).multipart(form))
            .await
    }

    async fn search(
        &self,
        mode: Mode,
        request: &SearchRequest,
    ) -> Result<Vec<SearchMatch>, ApiError> {
        let (endpoint, builder) = match mode {
            Mode::Keyword => {
                let endpoint = "/search/keyword-search";
                (endpoint, self.client.get(self.url(endpoint)).query(request))
            }
            Mode::Semantic => {
                let endpoint = "/search/embedding-search";
                (endpoint, self.client.post(self.url(endpoint)).json(request))
            }
            Mode::Hybrid => {
                let endpoint = "/search/search-hybrid";
                (endpoint, self.client.post(self.url(endpoint)).json(request))
            }
        };

        let body = self.send(endpoint, builder).await?;
        let decoded: MatchesResponse = decode_or_default(endpoint, &body);
        Ok(decoded.matches)
    }

    async fn ask(&self, request: &RagRequest) -> Result<RagAnswer, ApiError> {
        let endpoint = self.rag_backend.path();
        let body = self
            .send(endpoint, self.client.post(self.url(endpoint)).json(request))
            .await?;
        Ok(decode_or_default(endpoint, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpApi::new("http://localhost:8000/", Duration::from_secs(1), None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url("/workspace/buckets"), "http://localhost:8000/workspace/buckets");
    }

    #[test]
    fn test_rag_backend_path() {
        assert_eq!(RagBackend::Hosted.path(), "/rag/rag");
        assert_eq!(RagBackend::Local.path(), "/rag/rag-ollama");
    }
}
