//! Error types for notes-core

use thiserror::Error;

/// Result type alias using notes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No note file exists for the title
    #[error("Note '{0}' not found")]
    NotFound(String),

    /// A note file already exists for the title
    #[error("Note '{0}' already exists")]
    AlreadyExists(String),

    /// Title cannot be mapped to a note file name
    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    /// Status value outside of open / in-progress / done
    #[error("Invalid status '{0}' (expected one of: open, in-progress, done)")]
    InvalidStatus(String),

    /// Editor executable could not be launched
    #[error("Editor '{0}' not found. Please set $EDITOR or $VISUAL.")]
    EditorUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF rendering error
    #[error("Render error: {0}")]
    Render(String),

    /// Backup archive error
    #[error("Archive error: {0}")]
    Archive(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
