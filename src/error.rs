//! Error types for the precedent retrieval node.

/// Top-level error type for node startup and the stdio host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file or environment error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workflow state (de)serialization error.
    #[error("state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error surfaced by the search client during setup.
    #[error(transparent)]
    Search(#[from] law_search::SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
