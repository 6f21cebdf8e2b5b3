//! File-based repositories.
//!
//! Every save is a bincode file with a hex SHA-256 sidecar. Writes go to a
//! temporary file first and are moved into place with an atomic rename;
//! reads verify the sidecar before deserializing.

mod character;
mod world;

pub use character::FileCharacterRepository;
pub use world::FileWorldRepository;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::digest::{digest_hex, short_digest};
use super::{RepositoryError, Result};

fn digest_path(path: &Path) -> PathBuf {
    path.with_extension("bin.sha256")
}

/// Serializes `value` and writes it with its digest.
pub(crate) fn write_verified<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes =
        bincode::serialize(value).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let digest = digest_hex(&bytes);

    let temp_path = path.with_extension("bin.tmp");
    let digest_file = digest_path(path);
    let temp_digest = digest_file.with_extension("sha256.tmp");

    // Write to temp files
    fs::write(&temp_path, &bytes)?;
    fs::write(&temp_digest, &digest)?;

    // Atomic rename
    fs::rename(&temp_path, path)?;
    fs::rename(&temp_digest, &digest_file)?;

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        digest = %short_digest(&bytes),
        "wrote save"
    );
    Ok(())
}

/// Reads and verifies a save. A missing save is `Ok(None)`.
pub(crate) fn read_verified<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    let digest_file = digest_path(path);
    if !digest_file.exists() {
        return Err(RepositoryError::MissingDigest(path.to_path_buf()));
    }
    let expected = fs::read_to_string(&digest_file)?.trim().to_owned();
    let actual = digest_hex(&bytes);
    if expected != actual {
        return Err(RepositoryError::DigestMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    let value =
        bincode::deserialize(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read save");
    Ok(Some(value))
}

/// Removes a save and its digest, ignoring files that do not exist.
pub(crate) fn remove(path: &Path) -> Result<()> {
    for file in [path.to_path_buf(), digest_path(path)] {
        if file.exists() {
            fs::remove_file(&file)?;
        }
    }
    Ok(())
}
