//! Error types raised by repository implementations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("digest file missing for {}", .0.display())]
    MissingDigest(PathBuf),

    #[error("digest mismatch for {}: expected {expected}, found {actual}", path.display())]
    DigestMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("invalid world name '{0}'")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
