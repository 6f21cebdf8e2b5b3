//! Tunable balance parameters.
//!
//! The exact coefficients are calibration data, not rules: the rule modules
//! only rely on the shape they produce (monotonic curves, bounded multipliers).
//! Every section implements `Default` with the shipped values so a partial
//! `config.toml` only needs to override what it changes.

use crate::world::WorldEvent;

/// Root configuration consumed by every engine component.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Fixed simulation rate used to convert seconds into ticks.
    pub ticks_per_second: u32,
    pub leveling: LevelingConfig,
    pub experience: ExperienceConfig,
    pub attribution: AttributionConfig,
    pub damage: DamageConfig,
    pub world: WorldConfig,
}

impl ProgressionConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of hotbar slots per character.
    pub const HOTBAR_SLOTS: usize = 10;
    /// Maximum prerequisites a single skill template may declare.
    pub const MAX_PREREQUISITES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

    pub fn new() -> Self {
        Self {
            ticks_per_second: Self::DEFAULT_TICKS_PER_SECOND,
            leveling: LevelingConfig::default(),
            experience: ExperienceConfig::default(),
            attribution: AttributionConfig::default(),
            damage: DamageConfig::default(),
            world: WorldConfig::default(),
        }
    }

    /// Converts a duration in seconds into whole simulation ticks (rounded up).
    pub fn seconds_to_ticks(&self, seconds: f32) -> u64 {
        if seconds <= 0.0 {
            return 0;
        }
        (seconds * self.ticks_per_second as f32).ceil() as u64
    }

    /// Attribution inactivity window expressed in ticks.
    pub fn attribution_timeout_ticks(&self) -> u64 {
        self.seconds_to_ticks(self.attribution.timeout_seconds)
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Level curve and per-level grants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelingConfig {
    /// Level cap before any boss has been counted.
    pub base_level_cap: u32,
    /// Cap applied once the world reaches the unlimited tier.
    pub max_level: u32,
    pub stat_points_per_level: u32,
    pub skill_points_per_level: u32,
    /// `required(level) = xp_base * level^xp_exponent + xp_linear * level`
    pub xp_base: f64,
    pub xp_exponent: f64,
    pub xp_linear: f64,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            base_level_cap: 20,
            max_level: 999,
            stat_points_per_level: 3,
            skill_points_per_level: 1,
            xp_base: 100.0,
            xp_exponent: 1.6,
            xp_linear: 25.0,
        }
    }
}

/// Kill reward coefficients.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperienceConfig {
    pub xp_per_life: f64,
    pub xp_per_defense: f64,
    /// Added per effective world level.
    pub world_level_step: f64,
    /// Added per monster level (regular mobs only).
    pub monster_level_step: f64,
    pub boss_xp_base: f64,
    pub boss_level_exponent: f64,
    /// Bonus per level the party is below the boss.
    pub catch_up_bonus_per_level: f64,
    /// Upper bound of the under-level bonus.
    pub catch_up_bonus_cap: f64,
    /// Reduction rate per level the party is above the boss.
    pub over_level_decay: f64,
    /// Lower bound of the over-level factor; keeps rewards positive.
    pub min_boss_factor: f64,
    pub events: EventMultipliers,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            xp_per_life: 0.2,
            xp_per_defense: 0.5,
            world_level_step: 0.05,
            monster_level_step: 0.03,
            boss_xp_base: 150.0,
            boss_level_exponent: 1.25,
            catch_up_bonus_per_level: 0.05,
            catch_up_bonus_cap: 0.5,
            over_level_decay: 0.15,
            min_boss_factor: 0.1,
            events: EventMultipliers::default(),
        }
    }
}

/// XP multiplier per temporary world event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventMultipliers {
    pub blood_moon: f64,
    pub solar_eclipse: f64,
    pub goblin_army: f64,
    pub pirate_invasion: f64,
    pub pumpkin_moon: f64,
    pub frost_moon: f64,
    pub martian_madness: f64,
}

impl EventMultipliers {
    pub fn get(&self, event: WorldEvent) -> f64 {
        match event {
            WorldEvent::BloodMoon => self.blood_moon,
            WorldEvent::SolarEclipse => self.solar_eclipse,
            WorldEvent::GoblinArmy => self.goblin_army,
            WorldEvent::PirateInvasion => self.pirate_invasion,
            WorldEvent::PumpkinMoon => self.pumpkin_moon,
            WorldEvent::FrostMoon => self.frost_moon,
            WorldEvent::MartianMadness => self.martian_madness,
        }
    }
}

impl Default for EventMultipliers {
    fn default() -> Self {
        Self {
            blood_moon: 1.25,
            solar_eclipse: 1.5,
            goblin_army: 1.2,
            pirate_invasion: 1.3,
            pumpkin_moon: 1.5,
            frost_moon: 1.5,
            martian_madness: 1.75,
        }
    }
}

/// Damage attribution ledger parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributionConfig {
    /// Inactivity window after which hits stop counting.
    pub timeout_seconds: f32,
    /// Cumulative damage a contributor needs to be eligible.
    pub minimum_damage: u64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10.0,
            minimum_damage: 1,
        }
    }
}

/// Damage roll parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageConfig {
    /// Symmetric variance before luck, in percent.
    pub variance_percent: f32,
    /// Luck value at which the luck factor reaches one half.
    pub luck_half_point: f32,
    /// How strongly luck narrows the low side of the roll (0..=1).
    pub luck_unfavorable_weight: f32,
    /// How strongly luck narrows the high side of the roll (0..=1).
    pub luck_favorable_weight: f32,
    /// Crit multiplier for skills without an override.
    pub crit_multiplier: f32,
    pub minimum_damage: u32,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            variance_percent: 15.0,
            luck_half_point: 50.0,
            luck_unfavorable_weight: 0.8,
            luck_favorable_weight: 0.2,
            crit_multiplier: 2.0,
            minimum_damage: 1,
        }
    }
}

/// World tier thresholds and spawn scaling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// World level at which each later tier begins. Any tier above
    /// pre-hardmode requires hardmode to have started.
    pub post_mechs_level: u32,
    pub pre_moonlord_level: u32,
    pub unlimited_level: u32,
    /// Ceiling applied to pre-hardmode content once hardmode has started.
    pub pre_hardmode_ceiling: u32,
    pub hp_per_world_level: f32,
    pub damage_per_world_level: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            post_mechs_level: 35,
            pre_moonlord_level: 50,
            unlimited_level: 70,
            pre_hardmode_ceiling: 20,
            hp_per_world_level: 0.04,
            damage_per_world_level: 0.02,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribution_timeout_defaults_to_ten_seconds_of_ticks() {
        let config = ProgressionConfig::default();
        assert_eq!(config.attribution_timeout_ticks(), 600);
    }

    #[test]
    fn seconds_to_ticks_rounds_up_and_ignores_negative() {
        let config = ProgressionConfig::default();
        assert_eq!(config.seconds_to_ticks(0.01), 1);
        assert_eq!(config.seconds_to_ticks(-3.0), 0);
    }
}
