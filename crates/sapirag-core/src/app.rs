use std::path::Path;
use std::sync::Arc;

use crate::api::{Mode, PdfUpload, SapiRagApi, Scope};
use crate::ask::AskCoordinator;
use crate::error::Result;
use crate::loader::LoaderGate;
use crate::results;
use crate::search::SearchCoordinator;
use crate::state::AppState;
use crate::upload::{UploadCoordinator, UploadOutcome};
use crate::workspace::{Confirm, WorkspaceManager};

/// One client session: the API, the busy indicator and all UI state.
///
/// Methods take `&mut self`, so actions on one session never interleave.
pub struct App {
    loader: LoaderGate,
    state: AppState,
    workspaces: WorkspaceManager,
    uploads: UploadCoordinator,
    search: SearchCoordinator,
    ask: AskCoordinator,
}

impl App {
    pub fn new(api: Arc<dyn SapiRagApi>) -> Self {
        Self::with_loader(api, LoaderGate::new())
    }

    pub fn with_loader(api: Arc<dyn SapiRagApi>, loader: LoaderGate) -> Self {
        Self {
            workspaces: WorkspaceManager::new(api.clone(), loader.clone()),
            uploads: UploadCoordinator::new(api.clone(), loader.clone()),
            search: SearchCoordinator::new(api.clone(), loader.clone()),
            ask: AskCoordinator::new(api, loader.clone()),
            loader,
            state: AppState::new(),
        }
    }

    /// Initial load: fetch the workspace list
    pub async fn init(&mut self) -> Result<()> {
        self.workspaces.list_workspaces(&mut self.state).await
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn loader(&self) -> &LoaderGate {
        &self.loader
    }

    pub async fn refresh_workspaces(&mut self) -> Result<()> {
        self.workspaces.list_workspaces(&mut self.state).await
    }

    pub async fn create_workspace(&mut self, raw: &str) -> Result<Option<String>> {
        self.workspaces.create_workspace(&mut self.state, raw).await
    }

    pub async fn delete_workspace(&mut self) -> Result<Option<String>> {
        self.workspaces.delete_workspace(&mut self.state).await
    }

    pub async fn select_workspace(&mut self, display: &str) -> Result<()> {
        self.workspaces.select_workspace(&mut self.state, display).await
    }

    /// Select a workspace without fetching its file list, for callers that
    /// name the target file themselves.
    pub fn enter_workspace(&mut self, display: &str) {
        self.state.select_workspace(display);
    }

    pub async fn refresh_files(&mut self) -> Result<()> {
        self.workspaces.refresh_files(&mut self.state).await
    }

    pub fn select_file(&mut self, filename: &str) -> Result<()> {
        self.workspaces.select_file(&mut self.state, filename)
    }

    pub async fn delete_file(&mut self, confirm: &dyn Confirm) -> Result<Option<String>> {
        self.workspaces.delete_file(&mut self.state, confirm).await
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.state.set_scope(scope);
    }

    pub fn set_search_mode(&mut self, mode: Mode) {
        self.state.set_search_mode(mode);
    }

    pub fn set_rag_mode(&mut self, mode: Mode) {
        self.state.set_rag_mode(mode);
    }

    pub async fn upload(&mut self, file: PdfUpload) -> Result<UploadOutcome> {
        self.uploads.upload(&mut self.state, file).await
    }

    pub async fn upload_path(&mut self, path: &Path) -> Result<UploadOutcome> {
        self.uploads.upload_path(&mut self.state, path).await
    }

    pub async fn search(&mut self, query: &str) -> Result<()> {
        self.search.search(&mut self.state, query).await
    }

    pub async fn ask(&mut self, question: &str) -> Result<()> {
        self.ask.ask(&mut self.state, question).await
    }

    pub fn render_results(&self) -> String {
        results::render_results(self.state.results())
    }

    pub fn render_answer(&self) -> String {
        results::render_answer(
            self.state.answer(),
            self.state.citations(),
            self.state.used_chunks(),
            self.state.answer_error(),
        )
    }
}
