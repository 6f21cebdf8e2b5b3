//! In-memory WorldRepository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use progression_core::WorldProgressionState;

use crate::repository::{RepositoryError, Result, WorldRepository};

#[derive(Default)]
pub struct InMemoryWorldRepo {
    worlds: RwLock<HashMap<String, WorldProgressionState>>,
}

impl InMemoryWorldRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorldRepository for InMemoryWorldRepo {
    fn save(&self, world: &str, state: &WorldProgressionState) -> Result<()> {
        self.worlds
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .insert(world.to_owned(), state.clone());
        Ok(())
    }

    fn load(&self, world: &str) -> Result<Option<WorldProgressionState>> {
        Ok(self
            .worlds
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .get(world)
            .cloned())
    }

    fn exists(&self, world: &str) -> bool {
        self.worlds
            .read()
            .map(|worlds| worlds.contains_key(world))
            .unwrap_or(false)
    }

    fn delete(&self, world: &str) -> Result<()> {
        self.worlds
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .remove(world);
        Ok(())
    }
}
