use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the traffic forensics crates.
#[derive(Error, Debug)]
pub enum ForensicsError {
    /// The log format selector is not one of the recognised tokens.
    #[error("Unknown log format '{value}'. Choose from: {valid}")]
    InvalidFormat { value: String, valid: String },

    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A summary could not be serialised as JSON.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForensicsError {
    /// `true` when the error is a [`ForensicsError::FileRead`] caused by a
    /// missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ForensicsError::FileRead { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Convenience alias used throughout the forensics crates.
pub type Result<T> = std::result::Result<T, ForensicsError>;
