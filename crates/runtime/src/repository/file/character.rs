//! File-based CharacterRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use progression_core::{CharacterId, CharacterSave};

use crate::repository::{CharacterRepository, Result};

use super::{read_verified, remove, write_verified};

/// Stores each character as `character_{id}.bin` with a
/// `character_{id}.bin.sha256` digest next to it.
pub struct FileCharacterRepository {
    base_dir: PathBuf,
}

impl FileCharacterRepository {
    /// Create a new file-based character repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Get the path to a character save.
    pub fn save_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("character_{}.bin", id.0))
    }
}

impl CharacterRepository for FileCharacterRepository {
    fn save(&self, save: &CharacterSave) -> Result<()> {
        write_verified(&self.save_path(save.id), save)?;
        tracing::info!(character = %save.id, level = save.progression.level(), "saved character");
        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<CharacterSave>> {
        read_verified(&self.save_path(id))
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.save_path(id).exists()
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        remove(&self.save_path(id))?;
        tracing::debug!(character = %id, "deleted character save");
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let id = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_prefix("character_"))
                .and_then(|s| s.strip_suffix(".bin"))
                .and_then(|s| s.parse::<u32>().ok());
            if let Some(id) = id {
                ids.push(CharacterId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
