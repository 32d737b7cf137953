//! Error types for Termlet.

/// Errors produced by the Termlet core.
#[derive(Debug, thiserror::Error)]
pub enum TermletError {
    /// Lookup failed for the named command.
    #[error("command not found: {0}")]
    UnknownCommand(String),

    // Displays without a prefix: the executor surfaces handler failures to
    // the user verbatim as `Error: <message>`.
    #[error("{0}")]
    Handler(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermletError>;
