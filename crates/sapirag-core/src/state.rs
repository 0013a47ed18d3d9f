use crate::api::{Mode, Scope, SearchMatch};
use crate::names;

/// Session state shared by every coordinator.
///
/// Coordinators read selection state freely. Writes go through the setters
/// below so that the two producers of the active file (explicit selection
/// and the latest upload) converge on one field.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) workspaces: Vec<String>,
    pub(crate) selected_workspace: String,
    pub(crate) scope: Scope,
    pub(crate) files: Vec<String>,
    pub(crate) active_file: String,
    pub(crate) search_mode: Mode,
    pub(crate) rag_mode: Mode,
    pub(crate) results: Vec<SearchMatch>,
    pub(crate) answer: String,
    pub(crate) citations: Option<String>,
    pub(crate) used_chunks: Vec<String>,
    pub(crate) answer_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            selected_workspace: String::new(),
            scope: Scope::File,
            files: Vec::new(),
            active_file: String::new(),
            search_mode: Mode::Keyword,
            rag_mode: Mode::Semantic,
            results: Vec::new(),
            answer: String::new(),
            citations: None,
            used_chunks: Vec::new(),
            answer_error: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspaces in display form
    pub fn workspaces(&self) -> &[String] {
        &self.workspaces
    }

    /// Selected workspace in display form, empty when none
    pub fn selected_workspace(&self) -> &str {
        &self.selected_workspace
    }

    /// Selected workspace in the form the API expects
    pub fn canonical_workspace(&self) -> &str {
        names::to_canonical(&self.selected_workspace)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// Under workspace scope the file picker is disabled but keeps its value.
    pub fn file_selection_enabled(&self) -> bool {
        self.scope == Scope::File
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn active_file(&self) -> &str {
        &self.active_file
    }

    /// Single writer for the active file. Last caller wins.
    pub fn set_active_file(&mut self, filename: impl Into<String>) {
        self.active_file = filename.into();
    }

    /// Filename to send with a request, honouring the current scope
    pub fn request_filename(&self) -> Option<String> {
        match self.scope {
            Scope::File if !self.active_file.is_empty() => Some(self.active_file.clone()),
            _ => None,
        }
    }

    pub fn search_mode(&self) -> Mode {
        self.search_mode
    }

    pub fn set_search_mode(&mut self, mode: Mode) {
        self.search_mode = mode;
    }

    pub fn rag_mode(&self) -> Mode {
        self.rag_mode
    }

    pub fn set_rag_mode(&mut self, mode: Mode) {
        self.rag_mode = mode;
    }

    pub fn results(&self) -> &[SearchMatch] {
        &self.results
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn citations(&self) -> Option<&str> {
        self.citations.as_deref()
    }

    /// Passages the local backend says it answered from
    pub fn used_chunks(&self) -> &[String] {
        &self.used_chunks
    }

    /// Error text the answer backend returned alongside a 200 response
    pub fn answer_error(&self) -> Option<&str> {
        self.answer_error.as_deref()
    }

    /// Switch workspace, dropping any file state tied to the old one
    pub(crate) fn select_workspace(&mut self, display: &str) {
        self.selected_workspace = display.to_string();
        self.files.clear();
        self.active_file.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = AppState::new();
        assert_eq!(state.scope(), Scope::File);
        assert_eq!(state.search_mode(), Mode::Keyword);
        assert_eq!(state.rag_mode(), Mode::Semantic);
        assert!(state.active_file().is_empty());
    }

    #[test]
    fn test_workspace_scope_hides_active_file() {
        let mut state = AppState::new();
        state.set_active_file("contract.pdf");
        assert_eq!(state.request_filename().as_deref(), Some("contract.pdf"));

        state.set_scope(Scope::Workspace);
        assert_eq!(state.request_filename(), None);
        assert!(!state.file_selection_enabled());
        // disabled, not cleared
        assert_eq!(state.active_file(), "contract.pdf");
    }

    #[test]
    fn test_select_workspace_resets_files() {
        let mut state = AppState::new();
        state.files = vec!["a.pdf".into()];
        state.set_active_file("a.pdf");
        state.select_workspace("workspace-hr");
        assert_eq!(state.canonical_workspace(), "hr");
        assert!(state.files().is_empty());
        assert!(state.active_file().is_empty());
    }
}
