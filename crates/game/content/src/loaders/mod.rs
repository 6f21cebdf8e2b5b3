//! Content loaders for reading progression data from files.
//!
//! Every loader exposes `parse` for in-memory text and `load` for a path, and
//! returns core types directly.

pub mod bosses;
pub mod config;
pub mod embedded;
pub mod factory;
pub mod skills;

pub use bosses::BossLoader;
pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Checks the static tables content files refer to by name.
///
/// Runs before any content is handed to the runtime.
pub fn validate_static_tables() -> LoadResult<()> {
    progression_core::Job::validate_lookup_table()
        .map_err(|e| anyhow::anyhow!("Job name table is invalid: {}", e))
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_tables_are_valid() {
        validate_static_tables().unwrap();
    }
}
