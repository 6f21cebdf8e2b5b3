//! Experience curves and reward multipliers.

use crate::config::{EventMultipliers, ExperienceConfig, LevelingConfig};
use crate::world::WorldEvents;

use super::sanitize_multiplier;

/// XP needed to advance from `level` to `level + 1`.
///
/// `xp_base * level^xp_exponent + xp_linear * level`, rounded, at least 1.
/// Strictly increasing in `level` for any non-negative coefficients with a
/// positive base or linear term.
pub fn xp_required_for_level(level: u32, config: &LevelingConfig) -> u64 {
    let level = level.max(1) as f64;
    let required = config.xp_base * level.powf(config.xp_exponent) + config.xp_linear * level;
    (required.round() as u64).max(1)
}

/// Cumulative XP needed to go from level 1 to `level`.
pub fn total_xp_for_level(level: u32, config: &LevelingConfig) -> u64 {
    (1..level.max(1))
        .map(|lvl| xp_required_for_level(lvl, config))
        .sum()
}

/// Baseline XP of a regular kill, from the entity's toughness.
pub fn base_kill_xp(max_life: u32, defense: u32, config: &ExperienceConfig) -> f64 {
    let xp = max_life as f64 * config.xp_per_life + defense as f64 * config.xp_per_defense;
    xp.max(1.0)
}

/// `1 + world_level * step`
pub fn world_level_multiplier(effective_world_level: u32, config: &ExperienceConfig) -> f64 {
    sanitize_multiplier(1.0 + effective_world_level as f64 * config.world_level_step)
}

/// `1 + monster_level * step`
pub fn monster_level_multiplier(monster_level: u32, config: &ExperienceConfig) -> f64 {
    sanitize_multiplier(1.0 + monster_level as f64 * config.monster_level_step)
}

/// Catch-up factor for boss rewards.
///
/// - party at or below the boss: `1 + min(diff * bonus, cap)`
/// - party above the boss: `1 / (1 + diff * decay)`, floored at the minimum
///
/// Non-increasing in `party_level`, always positive.
pub fn boss_catch_up_factor(boss_level: u32, party_level: f64, config: &ExperienceConfig) -> f64 {
    let diff = party_level - boss_level as f64;
    let factor = if diff <= 0.0 {
        1.0 + (-diff * config.catch_up_bonus_per_level).min(config.catch_up_bonus_cap.max(0.0))
    } else {
        1.0 / (1.0 + diff * config.over_level_decay.max(0.0))
    };
    factor.max(config.min_boss_factor.max(f64::EPSILON))
}

/// Boss baseline before world/event/content multipliers.
pub fn boss_baseline_xp(boss_level: u32, party_level: f64, config: &ExperienceConfig) -> f64 {
    let level = boss_level.max(1) as f64;
    let baseline = config.boss_xp_base * level.powf(config.boss_level_exponent);
    (baseline * boss_catch_up_factor(boss_level, party_level, config)).max(1.0)
}

/// Highest multiplier among active events; events do not stack.
pub fn event_multiplier(events: &WorldEvents, config: &EventMultipliers) -> f64 {
    events
        .iter()
        .map(|event| sanitize_multiplier(config.get(event)))
        .fold(1.0, f64::max)
}
