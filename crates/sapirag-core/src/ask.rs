use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{RagRequest, SapiRagApi, Scope, RAG_SCORE_THRESHOLD, RAG_TOP_K};
use crate::error::{Rejection, Result};
use crate::loader::LoaderGate;
use crate::state::AppState;

/// Shown when the server responds without an answer
pub const NO_ANSWER: &str = "No answer found.";

/// Validates and sends natural-language questions
pub struct AskCoordinator {
    api: Arc<dyn SapiRagApi>,
    loader: LoaderGate,
}

impl AskCoordinator {
    pub fn new(api: Arc<dyn SapiRagApi>, loader: LoaderGate) -> Self {
        Self { api, loader }
    }

    /// Same preconditions as search, checked in the same order
    pub fn prepare(state: &AppState, question: &str) -> std::result::Result<RagRequest, Rejection> {
        if question.trim().is_empty() {
            return Err(Rejection::EmptyQuestion);
        }
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace);
        }
        if state.scope() == Scope::File && state.active_file().is_empty() {
            return Err(Rejection::NoActiveFile);
        }

        Ok(RagRequest {
            question: question.to_string(),
            mode: state.rag_mode(),
            top_k: RAG_TOP_K,
            score_threshold: RAG_SCORE_THRESHOLD,
            workspace: state.canonical_workspace().to_string(),
            filename: state.request_filename(),
        })
    }

    /// Ask a question and replace the published answer
    pub async fn ask(&self, state: &mut AppState, question: &str) -> Result<()> {
        let request = Self::prepare(state, question)?;

        let response = self
            .loader
            .run("RAG answering…", self.api.ask(&request))
            .await?;

        let error = response.error.filter(|e| !e.trim().is_empty());
        if let Some(ref err) = error {
            warn!(error = %err, "Answer backend reported an error");
        }
        info!(mode = request.mode.as_str(), "Answer received");

        // A backend error with no answer is shown as the error, not as the fallback
        state.answer = match (response.answer, &error) {
            (Some(answer), _) => answer,
            (None, Some(_)) => String::new(),
            (None, None) => NO_ANSWER.to_string(),
        };
        state.citations = response.citations.filter(|c| !c.trim().is_empty());
        state.used_chunks = response.used_chunks;
        state.answer_error = error;
        Ok(())
    }
}
