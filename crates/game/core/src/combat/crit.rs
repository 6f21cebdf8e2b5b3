//! Critical hit rolls.

use crate::config::DamageConfig;
use crate::env::{RngOracle, compute_seed, roll_context};

/// Rolls a critical hit with the given chance (clamped to `[0, 1]`).
pub fn roll_crit(rng: &(impl RngOracle + ?Sized), seed: u64, crit_chance: f32) -> bool {
    let seed = compute_seed(seed, 0, 0, roll_context::CRIT);
    rng.chance(seed, crit_chance as f64)
}

/// Crit multiplier: the skill's override when present, else the configured
/// default. Never below 1.
pub fn crit_multiplier(skill_override: Option<f32>, config: &DamageConfig) -> f32 {
    skill_override
        .filter(|value| value.is_finite())
        .unwrap_or(config.crit_multiplier)
        .max(1.0)
}
