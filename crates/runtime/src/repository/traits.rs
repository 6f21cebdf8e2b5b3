//! Repository contracts for saving and loading mutable progression state.

use progression_core::{CharacterId, CharacterSave, WorldProgressionState};

use super::Result;

/// Repository for per-character progression saves
///
/// Stores level, XP, job, point pools, attributes, learned ranks and hotbar.
/// Cooldowns and resources are not persisted.
pub trait CharacterRepository: Send + Sync {
    /// Save a character, replacing any previous save
    fn save(&self, save: &CharacterSave) -> Result<()>;

    /// Load a character by id
    fn load(&self, id: CharacterId) -> Result<Option<CharacterSave>>;

    /// Check if a save exists
    fn exists(&self, id: CharacterId) -> bool;

    /// Delete a save
    fn delete(&self, id: CharacterId) -> Result<()>;

    /// List all saved character ids
    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        Ok(vec![])
    }
}

/// Repository for world progression, keyed by world name
///
/// Only the boss ledger and debug floor matter: derived fields are rebuilt
/// from content after loading.
pub trait WorldRepository: Send + Sync {
    /// Save the world state under `world`
    fn save(&self, world: &str, state: &WorldProgressionState) -> Result<()>;

    /// Load the world state saved under `world`
    fn load(&self, world: &str) -> Result<Option<WorldProgressionState>>;

    /// Check if a world save exists
    fn exists(&self, world: &str) -> bool;

    /// Delete a world save
    fn delete(&self, world: &str) -> Result<()>;
}
