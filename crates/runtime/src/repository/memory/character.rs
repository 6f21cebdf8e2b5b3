//! In-memory CharacterRepository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use progression_core::{CharacterId, CharacterSave};

use crate::repository::{CharacterRepository, RepositoryError, Result};

/// Stores saves by character id.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    saves: RwLock<HashMap<CharacterId, CharacterSave>>,
}

impl InMemoryCharacterRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn save(&self, save: &CharacterSave) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(save.id, save.clone());
        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<CharacterSave>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(&id).cloned())
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<CharacterId> = saves.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
