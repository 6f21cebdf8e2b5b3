//! Shipped content compiled into the binary.
//!
//! Used when no data directory is configured, and by tests that need the
//! real catalog without touching the filesystem.

use progression_core::{ProgressionConfig, StaticBossTable, StaticSkillTable};

use crate::loaders::{
    BossLoader, ConfigLoader, GameContent, LoadResult, SkillLoader, validate_static_tables,
};

pub const CONFIG: &str = include_str!("../../data/config.toml");
pub const BOSSES: &str = include_str!("../../data/bosses.ron");

/// Skill catalog files as `(file name, contents)`, in name order.
pub const SKILL_FILES: &[(&str, &str)] = &[
    ("mage.ron", include_str!("../../data/skills/mage.ron")),
    ("novice.ron", include_str!("../../data/skills/novice.ron")),
    ("ranger.ron", include_str!("../../data/skills/ranger.ron")),
    ("warrior.ron", include_str!("../../data/skills/warrior.ron")),
];

pub fn config() -> LoadResult<ProgressionConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn bosses() -> LoadResult<StaticBossTable> {
    BossLoader::build(BossLoader::parse(BOSSES, "bosses.ron")?)
}

pub fn skills() -> LoadResult<StaticSkillTable> {
    let mut templates = Vec::new();
    for (name, content) in SKILL_FILES {
        templates.extend(SkillLoader::parse(content, name)?);
    }
    SkillLoader::build(templates)
}

/// The full shipped content set.
pub fn content() -> LoadResult<GameContent> {
    validate_static_tables()?;
    Ok(GameContent {
        config: config()?,
        skills: skills()?,
        bosses: bosses()?,
    })
}
