use std::sync::Arc;

use tracing::info;

use crate::api::{SapiRagApi, Scope, SearchRequest, SEARCH_TOP_K};
use crate::error::{Rejection, Result};
use crate::loader::LoaderGate;
use crate::state::AppState;

/// Validates and dispatches searches in the current search mode
pub struct SearchCoordinator {
    api: Arc<dyn SapiRagApi>,
    loader: LoaderGate,
}

impl SearchCoordinator {
    pub fn new(api: Arc<dyn SapiRagApi>, loader: LoaderGate) -> Self {
        Self { api, loader }
    }

    /// Build the request for `query`, or the first failed precondition
    pub fn prepare(state: &AppState, query: &str) -> std::result::Result<SearchRequest, Rejection> {
        if query.trim().is_empty() {
            return Err(Rejection::EmptyQuery);
        }
        if state.selected_workspace().is_empty() {
            return Err(Rejection::NoWorkspace);
        }
        if state.scope() == Scope::File && state.active_file().is_empty() {
            return Err(Rejection::NoActiveFile);
        }

        Ok(SearchRequest {
            query: query.to_string(),
            top_k: SEARCH_TOP_K,
            workspace: state.canonical_workspace().to_string(),
            filename: state.request_filename(),
        })
    }

    /// Run a search and replace the published results
    pub async fn search(&self, state: &mut AppState, query: &str) -> Result<()> {
        let request = Self::prepare(state, query)?;
        let mode = state.search_mode();

        let matches = self
            .loader
            .run(
                format!("{} search…", mode.label()),
                self.api.search(mode, &request),
            )
            .await?;

        info!(mode = mode.as_str(), matches = matches.len(), "Search completed");
        state.results = matches;
        Ok(())
    }
}
