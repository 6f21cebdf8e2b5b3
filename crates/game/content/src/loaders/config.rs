//! Balance configuration loader.

use std::path::Path;

use progression_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ProgressionConfig`] from TOML files.
///
/// Missing keys keep their defaults, so a file only lists what it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Rejects values the rule modules cannot work with.
    pub fn validate(config: &ProgressionConfig) -> LoadResult<()> {
        if config.ticks_per_second == 0 {
            anyhow::bail!("ticks_per_second must be positive");
        }

        let leveling = &config.leveling;
        if leveling.base_level_cap == 0 || leveling.max_level < leveling.base_level_cap {
            anyhow::bail!(
                "leveling: need 1 <= base_level_cap ({}) <= max_level ({})",
                leveling.base_level_cap,
                leveling.max_level
            );
        }
        if !(leveling.xp_base >= 0.0 && leveling.xp_exponent >= 0.0 && leveling.xp_linear >= 0.0)
            || leveling.xp_base + leveling.xp_linear <= 0.0
        {
            anyhow::bail!("leveling: XP curve coefficients must be non-negative and not all zero");
        }

        let world = &config.world;
        if !(world.post_mechs_level <= world.pre_moonlord_level
            && world.pre_moonlord_level <= world.unlimited_level)
        {
            anyhow::bail!("world: tier thresholds must be ascending");
        }

        let damage = &config.damage;
        if !(0.0..=100.0).contains(&damage.variance_percent) {
            anyhow::bail!("damage: variance_percent must be within 0..=100");
        }

        let attribution = &config.attribution;
        if !(attribution.timeout_seconds.is_finite() && attribution.timeout_seconds > 0.0) {
            anyhow::bail!("attribution: timeout_seconds must be positive");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [attribution]
            timeout_seconds = 5.0

            [experience.events]
            blood_moon = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.attribution.timeout_seconds, 5.0);
        assert_eq!(config.attribution.minimum_damage, 1);
        assert_eq!(config.experience.events.blood_moon, 2.0);
        assert_eq!(config.leveling, ProgressionConfig::default().leveling);
    }

    #[test]
    fn rejects_descending_tiers() {
        let err = ConfigLoader::parse(
            r#"
            [world]
            post_mechs_level = 60
            pre_moonlord_level = 50
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ascending"));
    }

    #[test]
    fn rejects_zero_tick_rate() {
        assert!(ConfigLoader::parse("ticks_per_second = 0").is_err());
    }
}
