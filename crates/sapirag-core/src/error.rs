//! Error types for SapiRAG client operations.

use std::path::PathBuf;

use thiserror::Error;

/// A precondition failed before any request was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Please enter the search query")]
    EmptyQuery,

    #[error("Please enter a question")]
    EmptyQuestion,

    #[error("Select a workspace!")]
    NoWorkspace,

    #[error("Select a file!")]
    NoActiveFile,

    #[error("Enter a name for the new workspace")]
    EmptyWorkspaceName,

    #[error("File selection is disabled while searching the full workspace")]
    FileSelectionDisabled,

    /// The user declined a confirmation prompt.
    #[error("Cancelled")]
    Cancelled,
}

/// Transport or server failure talking to the SapiRAG API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// Main error type for coordinator operations.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Upload succeeded but the server refused to index the file.
    #[error("uploaded {filename} but embedding generation failed: {source}")]
    Indexing {
        filename: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Whether the operation stopped at validation without touching the network.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Rejected(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
