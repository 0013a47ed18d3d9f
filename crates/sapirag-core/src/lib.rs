pub mod api;
pub mod app;
pub mod ask;
pub mod error;
pub mod loader;
pub mod names;
pub mod results;
pub mod search;
pub mod state;
pub mod upload;
pub mod workspace;

pub use api::{
    HttpApi, Mode, PdfUpload, RagAnswer, RagBackend, RagRequest, SapiRagApi, Scope, SearchMatch,
    SearchRequest,
};
pub use app::App;
pub use ask::{AskCoordinator, NO_ANSWER};
pub use error::{ApiError, AppError, Rejection};
pub use loader::{BusyState, LoaderGate};
pub use search::SearchCoordinator;
pub use state::AppState;
pub use upload::{UploadCoordinator, UploadOutcome};
pub use workspace::{AssumeYes, Confirm, WorkspaceManager};

/// Initialize structured JSON logging on stderr
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
