//! Boss progression table loader.

use std::collections::BTreeSet;
use std::path::Path;

use progression_core::{BossProgression, StaticBossTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Boss table file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossFile {
    pub bosses: Vec<BossProgression>,
}

/// Loader for the boss progression table from RON files.
pub struct BossLoader;

impl BossLoader {
    pub fn parse(content: &str, origin: &str) -> LoadResult<Vec<BossProgression>> {
        let file: BossFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse boss table RON {}: {}", origin, e))?;
        Ok(file.bosses)
    }

    /// Load and validate the boss table from a RON file.
    pub fn load(path: &Path) -> LoadResult<StaticBossTable> {
        let content = read_file(path)?;
        Self::build(Self::parse(&content, &path.display().to_string())?)
    }

    /// Rejects duplicate or empty ids and builds the lookup table.
    pub fn build(bosses: Vec<BossProgression>) -> LoadResult<StaticBossTable> {
        let mut seen = BTreeSet::new();
        for boss in &bosses {
            if boss.id.as_str().trim().is_empty() {
                anyhow::bail!("Boss '{}' has an empty id", boss.display_name);
            }
            if !seen.insert(boss.id.clone()) {
                anyhow::bail!("Duplicate boss id {}", boss.id);
            }
        }

        let hardmode_starters = bosses.iter().filter(|boss| boss.starts_hardmode).count();
        if hardmode_starters == 0 && !bosses.is_empty() {
            tracing::warn!("boss table has no boss that starts hardmode");
        }
        tracing::debug!(count = bosses.len(), "boss table validated");

        Ok(StaticBossTable::new(bosses))
    }
}
