//! Skill catalog loader.
//!
//! Catalog files are RON documents with a single `skills` list. A catalog
//! directory holds one file per job line; files are read in name order and
//! validated together, since prerequisites cross file boundaries.

use std::path::Path;

use progression_core::{SkillTemplate, StaticSkillTable, validate_catalog};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillFile {
    pub skills: Vec<SkillTemplate>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Parses one catalog file. `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &str) -> LoadResult<Vec<SkillTemplate>> {
        let file: SkillFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON {}: {}", origin, e))?;
        Ok(file.skills)
    }

    /// Loads one catalog file without cross-file validation.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Loads and validates every `*.ron` file in `dir`.
    pub fn load_dir(dir: &Path) -> LoadResult<StaticSkillTable> {
        let mut paths = Vec::new();
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read skill directory {}: {}", dir.display(), e))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut templates = Vec::new();
        for path in &paths {
            let skills = Self::load(path)?;
            tracing::debug!(file = %path.display(), count = skills.len(), "loaded skill file");
            templates.extend(skills);
        }

        Self::build(templates)
    }

    /// Validates templates as one catalog and builds the lookup table.
    pub fn build(templates: Vec<SkillTemplate>) -> LoadResult<StaticSkillTable> {
        validate_catalog(&templates)
            .map_err(|e| anyhow::anyhow!("Invalid skill catalog: {}", e))?;
        tracing::debug!(count = templates.len(), "skill catalog validated");
        Ok(StaticSkillTable::new(templates))
    }
}
