//! File-based WorldRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use progression_core::WorldProgressionState;

use crate::repository::{RepositoryError, Result, WorldRepository};

use super::{read_verified, remove, write_verified};

/// Stores each world as `world_{name}.bin` with a digest sidecar.
pub struct FileWorldRepository {
    base_dir: PathBuf,
}

impl FileWorldRepository {
    /// Create a new file-based world repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a world save. Names are restricted to ASCII
    /// alphanumerics, `-` and `_` so they cannot escape the base directory.
    pub fn save_path(&self, world: &str) -> Result<PathBuf> {
        let valid = !world.is_empty()
            && world
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidName(world.to_owned()));
        }
        Ok(self.base_dir.join(format!("world_{}.bin", world)))
    }
}

impl WorldRepository for FileWorldRepository {
    fn save(&self, world: &str, state: &WorldProgressionState) -> Result<()> {
        write_verified(&self.save_path(world)?, state)?;
        tracing::info!(
            world,
            world_level = state.world_level(),
            bosses = state.counted_bosses().count(),
            "saved world"
        );
        Ok(())
    }

    fn load(&self, world: &str) -> Result<Option<WorldProgressionState>> {
        read_verified(&self.save_path(world)?)
    }

    fn exists(&self, world: &str) -> bool {
        self.save_path(world).is_ok_and(|path| path.exists())
    }

    fn delete(&self, world: &str) -> Result<()> {
        remove(&self.save_path(world)?)
    }
}
