//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use progression_core::{ProgressionConfig, StaticBossTable, StaticSkillTable};

use crate::loaders::{BossLoader, ConfigLoader, LoadResult, SkillLoader, validate_static_tables};

/// Everything the runtime needs from content.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: ProgressionConfig,
    pub skills: StaticSkillTable,
    pub bosses: StaticBossTable,
}

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── bosses.ron
/// └── skills/
///     ├── novice.ron
///     ├── warrior.ron
///     └── mage.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `config.toml`.
    ///
    /// A missing file yields the defaults.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ProgressionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and validate every skill catalog under `skills/`.
    pub fn load_skills(&self) -> LoadResult<StaticSkillTable> {
        SkillLoader::load_dir(&self.data_dir.join("skills"))
    }

    /// Load the boss table from `bosses.ron`.
    pub fn load_bosses(&self) -> LoadResult<StaticBossTable> {
        BossLoader::load(&self.data_dir.join("bosses.ron"))
    }

    /// Load the full content set.
    pub fn load(&self) -> LoadResult<GameContent> {
        validate_static_tables()?;
        let content = GameContent {
            config: self.load_config()?,
            skills: self.load_skills()?,
            bosses: self.load_bosses()?,
        };
        tracing::info!(
            data_dir = %self.data_dir.display(),
            skills = content.skills.len(),
            bosses = content.bosses.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::embedded;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_shipped_data_directory() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let content = factory.load().unwrap();

        let embedded = embedded::content().unwrap();
        assert_eq!(content.config, embedded.config);
        assert_eq!(content.skills.len(), embedded.skills.len());
        assert_eq!(content.bosses.len(), embedded.bosses.len());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), ProgressionConfig::default());
        assert!(factory.load_skills().is_err());
    }
}
