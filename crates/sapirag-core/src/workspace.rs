use std::sync::Arc;

use tracing::info;

use crate::api::SapiRagApi;
use crate::error::{AppError, Rejection, Result};
use crate::loader::LoaderGate;
use crate::names;
use crate::state::AppState;

/// Asks the user to approve a destructive action
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything (non-interactive use, `--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Workspace and file selection
pub struct WorkspaceManager {
    api: Arc<dyn SapiRagApi>,
    loader: LoaderGate,
}

impl WorkspaceManager {
    pub fn new(api: Arc<dyn SapiRagApi>, loader: LoaderGate) -> Self {
        Self { api, loader }
    }

    /// Refresh the workspace list
    pub async fn list_workspaces(&self, state: &mut AppState) -> Result<()> {
        let buckets = self
            .loader
            .run("Loading workspaces…", self.api.list_buckets())
            .await?;
        state.workspaces = buckets;
        Ok(())
    }

    /// Create `workspace-<raw lower-cased>` and refresh the list. The new
    /// workspace is not selected.
    pub async fn create_workspace(
        &self,
        state: &mut AppState,
        raw: &str,
    ) -> Result<Option<String>> {
        if raw.trim().is_empty() {
            return Err(Rejection::EmptyWorkspaceName.into());
        }
        let bucket = names::bucket_name_for(raw);

        self.loader
            .run("Creating a workspace…", async {
                let message = self.api.create_bucket(&bucket).await?;
                info!(bucket = %bucket, "Workspace created");
                state.workspaces = self.api.list_buckets().await?;
                Ok::<_, AppError>(message)
            })
            .await
    }

    /// Delete the selected workspace, clear the selection and refresh the list
    pub async fn delete_workspace(&self, state: &mut AppState) -> Result<Option<String>> {
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace.into());
        }
        let workspace = state.canonical_workspace().to_string();

        self.loader
            .run("Deleting workspace…", async {
                let message = self.api.delete_workspace(&workspace).await?;
                info!(workspace = %workspace, "Workspace deleted");
                state.select_workspace("");
                state.workspaces = self.api.list_buckets().await?;
                Ok::<_, AppError>(message)
            })
            .await
    }

    /// Select a workspace (display form). File state is reset before the new
    /// file list arrives; selecting `""` makes no request.
    pub async fn select_workspace(&self, state: &mut AppState, display: &str) -> Result<()> {
        state.select_workspace(display);
        if display.is_empty() {
            return Ok(());
        }

        let workspace = state.canonical_workspace().to_string();
        let files = self
            .loader
            .run("Refreshing PDF list…", self.list_files(&workspace))
            .await?;
        state.files = files;
        Ok(())
    }

    /// Files in a canonical workspace; no request for an empty name
    pub async fn list_files(&self, workspace: &str) -> Result<Vec<String>> {
        if workspace.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.api.list_pdfs(workspace).await?)
    }

    pub async fn refresh_files(&self, state: &mut AppState) -> Result<()> {
        let workspace = state.canonical_workspace().to_string();
        let files = self
            .loader
            .run("Refreshing PDF list…", self.list_files(&workspace))
            .await?;
        state.files = files;
        Ok(())
    }

    /// Pick the active file from the list
    pub fn select_file(&self, state: &mut AppState, filename: &str) -> Result<()> {
        if !state.file_selection_enabled() {
            return Err(Rejection::FileSelectionDisabled.into());
        }
        state.set_active_file(filename);
        Ok(())
    }

    /// Delete the active file after confirmation, then refresh the file list
    pub async fn delete_file(
        &self,
        state: &mut AppState,
        confirm: &dyn Confirm,
    ) -> Result<Option<String>> {
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace.into());
        }
        if state.active_file().is_empty() {
            return Err(Rejection::NoActiveFile.into());
        }
        let filename = state.active_file().to_string();
        if !confirm.confirm(&format!("Are you sure you want to delete: {}?", filename)) {
            return Err(Rejection::Cancelled.into());
        }
        let workspace = state.canonical_workspace().to_string();

        self.loader
            .run("Deleting PDF…", async {
                let message = self.api.delete_pdf(&workspace, &filename).await?;
                info!(workspace = %workspace, filename = %filename, "PDF deleted");
                if state.active_file() == filename {
                    state.set_active_file("");
                }
                state.files = self.api.list_pdfs(&workspace).await?;
                Ok::<_, AppError>(message)
            })
            .await
    }
}
