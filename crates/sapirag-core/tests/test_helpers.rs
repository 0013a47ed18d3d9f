//! Shared test helpers: recording mock API (no network).
#![allow(dead_code)] // helpers used across multiple test crates

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sapirag_core::{
    ApiError, App, Mode, PdfUpload, RagAnswer, RagRequest, SapiRagApi, SearchMatch, SearchRequest,
};

/// A request the app sent to the API
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListBuckets,
    CreateBucket(String),
    DeleteWorkspace(String),
    ListPdfs(String),
    UploadPdf { file_name: String, workspace: String },
    DeletePdf { workspace: String, filename: String },
    GenerateEmbeddings { filename: String, workspace: String },
    Search(Mode, SearchRequest),
    Ask(RagRequest),
}

/// Mock API that records every call and returns canned data
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    buckets: Mutex<Vec<String>>,
    pdfs: Mutex<HashMap<String, Vec<String>>>,
    stored_name: Mutex<Option<String>>,
    matches: Mutex<Vec<SearchMatch>>,
    answer: Mutex<RagAnswer>,
    fail_embeddings: AtomicBool,
    fail_search: AtomicBool,
    fail_list_buckets: AtomicBool,
    fail_list_pdfs: AtomicBool,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(self, buckets: &[&str]) -> Self {
        *self.buckets.lock().unwrap() = buckets.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_pdfs(self, workspace: &str, files: &[&str]) -> Self {
        self.pdfs.lock().unwrap().insert(
            workspace.to_string(),
            files.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Filename the server claims to have stored an upload under
    pub fn with_stored_name(self, name: &str) -> Self {
        *self.stored_name.lock().unwrap() = Some(name.to_string());
        self
    }

    pub fn with_matches(self, matches: Vec<SearchMatch>) -> Self {
        *self.matches.lock().unwrap() = matches;
        self
    }

    pub fn with_answer(self, answer: RagAnswer) -> Self {
        *self.answer.lock().unwrap() = answer;
        self
    }

    /// Replace the canned answer between questions
    pub fn set_answer(&self, answer: RagAnswer) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn failing_embeddings(self) -> Self {
        self.fail_embeddings.store(true, Ordering::SeqCst);
        self
    }

    /// Make subsequent searches fail with a server error
    pub fn set_search_failing(&self, failing: bool) {
        self.fail_search.store(failing, Ordering::SeqCst);
    }

    /// Make subsequent workspace listings fail with a server error
    pub fn set_list_buckets_failing(&self, failing: bool) {
        self.fail_list_buckets.store(failing, Ordering::SeqCst);
    }

    /// Make subsequent PDF listings fail with a server error
    pub fn set_list_pdfs_failing(&self, failing: bool) {
        self.fail_list_pdfs.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error(endpoint: &str) -> ApiError {
    ApiError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl SapiRagApi for RecordingApi {
    async fn list_buckets(&self) -> Result<Vec<String>, ApiError> {
        self.record(Call::ListBuckets);
        if self.fail_list_buckets.load(Ordering::SeqCst) {
            return Err(server_error("/workspace/buckets"));
        }
        Ok(self.buckets.lock().unwrap().clone())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<Option<String>, ApiError> {
        self.record(Call::CreateBucket(bucket.to_string()));
        self.buckets.lock().unwrap().push(bucket.to_string());
        Ok(Some(format!("Bucket '{}' created.", bucket)))
    }

    async fn delete_workspace(&self, workspace: &str) -> Result<Option<String>, ApiError> {
        self.record(Call::DeleteWorkspace(workspace.to_string()));
        let bucket = format!("workspace-{}", workspace);
        self.buckets.lock().unwrap().retain(|b| *b != bucket);
        Ok(Some(format!("Workspace '{}' deleted.", workspace)))
    }

    async fn list_pdfs(&self, workspace: &str) -> Result<Vec<String>, ApiError> {
        self.record(Call::ListPdfs(workspace.to_string()));
        if self.fail_list_pdfs.load(Ordering::SeqCst) {
            return Err(server_error("/workspace/list-pdfs"));
        }
        Ok(self
            .pdfs
            .lock()
            .unwrap()
            .get(workspace)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload_pdf(
        &self,
        file: PdfUpload,
        workspace: &str,
    ) -> Result<Option<String>, ApiError> {
        self.record(Call::UploadPdf {
            file_name: file.file_name.clone(),
            workspace: workspace.to_string(),
        });
        let stored = self
            .stored_name
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(file.file_name);
        self.pdfs
            .lock()
            .unwrap()
            .entry(workspace.to_string())
            .or_default()
            .push(stored.clone());
        Ok(Some(stored))
    }

    async fn delete_pdf(
        &self,
        workspace: &str,
        filename: &str,
    ) -> Result<Option<String>, ApiError> {
        self.record(Call::DeletePdf {
            workspace: workspace.to_string(),
            filename: filename.to_string(),
        });
        if let Some(files) = self.pdfs.lock().unwrap().get_mut(workspace) {
            files.retain(|f| f != filename);
        }
        Ok(Some(format!("{} deleted from {} workspace", filename, workspace)))
    }

    async fn generate_embeddings(
        &self,
        filename: &str,
        workspace: &str,
    ) -> Result<Option<String>, ApiError> {
        self.record(Call::GenerateEmbeddings {
            filename: filename.to_string(),
            workspace: workspace.to_string(),
        });
        if self.fail_embeddings.load(Ordering::SeqCst) {
            return Err(server_error("/search/generate-embeddings"));
        }
        Ok(Some(format!("Embeddings saved for {}", filename)))
    }

    async fn search(
        &self,
        mode: Mode,
        request: &SearchRequest,
    ) -> Result<Vec<SearchMatch>, ApiError> {
        self.record(Call::Search(mode, request.clone()));
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(server_error("/search"));
        }
        Ok(self.matches.lock().unwrap().clone())
    }

    async fn ask(&self, request: &RagRequest) -> Result<RagAnswer, ApiError> {
        self.record(Call::Ask(request.clone()));
        Ok(self.answer.lock().unwrap().clone())
    }
}

/// Build an app over `api` and run the initial workspace load
pub async fn make_app(api: &Arc<RecordingApi>) -> App {
    let mut app = App::new(api.clone());
    app.init().await.unwrap();
    api.clear_calls();
    app
}

/// Confirmation that records each prompt and answers `reply`
pub struct ScriptedConfirm {
    pub reply: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(reply: bool) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl sapirag_core::Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
    }
}
