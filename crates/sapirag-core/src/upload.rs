use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{PdfUpload, SapiRagApi};
use crate::error::{AppError, Rejection, Result};
use crate::loader::LoaderGate;
use crate::state::AppState;

/// What a successful upload produced
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Name the server stored the file under (may differ from the local name)
    pub filename: String,
    /// Message from the embedding step
    pub message: Option<String>,
}

/// Uploads PDFs into the selected workspace and triggers indexing
pub struct UploadCoordinator {
    api: Arc<dyn SapiRagApi>,
    loader: LoaderGate,
}

impl UploadCoordinator {
    pub fn new(api: Arc<dyn SapiRagApi>, loader: LoaderGate) -> Self {
        Self { api, loader }
    }

    /// Read a local PDF and upload it
    pub async fn upload_path(&self, state: &mut AppState, path: &Path) -> Result<UploadOutcome> {
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace.into());
        }
        let bytes = tokio::fs::read(path).await.map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        self.upload(state, PdfUpload { file_name, bytes }).await
    }

    /// Upload, publish the server filename as the active file, request
    /// embeddings for it, then refresh the file list.
    ///
    /// An embedding failure still leaves the active file and file list
    /// updated, and is reported as [`AppError::Indexing`].
    pub async fn upload(&self, state: &mut AppState, file: PdfUpload) -> Result<UploadOutcome> {
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace.into());
        }
        let workspace = state.canonical_workspace().to_string();

        self.loader
            .run("Uploading and generating embedding…", async {
                let local_name = file.file_name.clone();
                let filename = match self.api.upload_pdf(file, &workspace).await? {
                    Some(name) => name,
                    None => {
                        warn!(local = %local_name, "Upload response had no filename");
                        local_name
                    }
                };
                info!(workspace = %workspace, filename = %filename, "PDF uploaded");
                state.set_active_file(filename.clone());

                let embedded = self.api.generate_embeddings(&filename, &workspace).await;
                let refreshed = self.api.list_pdfs(&workspace).await;

                match embedded {
                    Ok(message) => {
                        state.files = refreshed?;
                        Ok::<_, AppError>(UploadOutcome { filename, message })
                    }
                    Err(source) => {
                        warn!(filename = %filename, error = %source, "Embedding generation failed");
                        // The indexing failure outranks a failed list refresh
                        match refreshed {
                            Ok(files) => state.files = files,
                            Err(e) => warn!(error = %e, "PDF list refresh failed"),
                        }
                        Err(AppError::Indexing { filename, source })
                    }
                }
            })
            .await
    }
}
