//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during play:
//! - Character progression (level, points, learned ranks, hotbar)
//! - World progression (boss ledger, debug floor)
//!
//! Static content (skills, bosses, balance) is handled by oracles, not
//! repositories.

mod digest;
mod error;
mod file;
mod memory;
mod traits;

pub use digest::{digest_hex, short_digest};
pub use error::{RepositoryError, Result};
pub use file::{FileCharacterRepository, FileWorldRepository};
pub use memory::{InMemoryCharacterRepo, InMemoryWorldRepo};
pub use traits::{CharacterRepository, WorldRepository};
