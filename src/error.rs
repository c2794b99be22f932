//! Error types for retained-tui.

use std::io;

/// Error type for retained-tui operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal operation failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Layout calculation failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Element/component tree error.
    #[error("widget error: {0}")]
    Widget(String),

    /// Unicode handling error.
    #[error("unicode error: {0}")]
    Unicode(String),

    /// Internal error (programming error surfaced rather than panicking).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for retained-tui operations.
pub type Result<T> = std::result::Result<T, Error>;
