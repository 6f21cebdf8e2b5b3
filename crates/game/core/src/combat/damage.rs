//! Damage calculation.

use crate::config::DamageConfig;
use crate::env::{RngOracle, compute_seed, roll_context};

use super::crit::{crit_multiplier, roll_crit};
use super::result::DamageResult;

// ============================================================================
// Damage Class
// ============================================================================

/// Damage class. Multipliers, crit chance and armor penetration are held per
/// class on the attacker.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageClass {
    #[default]
    Melee,
    Ranged,
    Magic,
    Summon,
}

/// Attacker stats for one damage class.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassStats {
    pub damage_multiplier: f32,
    /// Probability in `[0, 1]`.
    pub crit_chance: f32,
    pub armor_penetration: u32,
}

impl ClassStats {
    pub const NEUTRAL: Self = Self {
        damage_multiplier: 1.0,
        crit_chance: 0.0,
        armor_penetration: 0,
    };
}

impl Default for ClassStats {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Class stats for every damage class.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassTable {
    pub melee: ClassStats,
    pub ranged: ClassStats,
    pub magic: ClassStats,
    pub summon: ClassStats,
}

impl ClassTable {
    pub fn get(&self, class: DamageClass) -> &ClassStats {
        match class {
            DamageClass::Melee => &self.melee,
            DamageClass::Ranged => &self.ranged,
            DamageClass::Magic => &self.magic,
            DamageClass::Summon => &self.summon,
        }
    }

    pub fn get_mut(&mut self, class: DamageClass) -> &mut ClassStats {
        match class {
            DamageClass::Melee => &mut self.melee,
            DamageClass::Ranged => &mut self.ranged,
            DamageClass::Magic => &mut self.magic,
            DamageClass::Summon => &mut self.summon,
        }
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// One hit to resolve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    /// Skill or weapon base power.
    pub base_power: u32,
    pub class: DamageClass,
    /// Value of the skill's damage table at its current rank (1.0 for plain
    /// weapon hits).
    pub rank_scaling: f32,
    /// Skill-specific crit multiplier, `None` for the configured default.
    pub crit_multiplier: Option<f32>,
    pub target_defense: u32,
}

impl DamageRequest {
    pub fn weapon(base_power: u32, class: DamageClass, target_defense: u32) -> Self {
        Self {
            base_power,
            class,
            rank_scaling: 1.0,
            crit_multiplier: None,
            target_defense,
        }
    }
}

/// Variance fractions `(unfavorable, favorable)` for a given luck value.
///
/// With zero luck both sides equal `variance_percent / 100`. Luck narrows
/// both sides, the unfavorable one more strongly.
pub fn variance_bounds(luck: u32, config: &DamageConfig) -> (f64, f64) {
    let variance = (config.variance_percent.max(0.0) / 100.0) as f64;
    let half = config.luck_half_point.max(f32::EPSILON) as f64;
    let luck = luck as f64;
    let factor = luck / (luck + half);

    let low = variance * (1.0 - factor * config.luck_unfavorable_weight.clamp(0.0, 1.0) as f64);
    let high = variance * (1.0 - factor * config.luck_favorable_weight.clamp(0.0, 1.0) as f64);
    (low, high)
}

/// `max(0, target_defense − armor_penetration)`
pub const fn effective_defense(target_defense: u32, armor_penetration: u32) -> u32 {
    target_defense.saturating_sub(armor_penetration)
}

/// Resolve a hit through the full pipeline.
///
/// # Arguments
///
/// * `request` - What is being hit with, and the target's defense
/// * `attacker` - Attacker stats for `request.class`
/// * `luck` - Attacker luck, narrows the variance roll
/// * `rng` - Seedable randomness for variance and crit
/// * `seed` - Seed for this hit; the same seed reproduces the same result
/// * `config` - Variance, crit and minimum damage parameters
pub fn resolve_damage(
    request: &DamageRequest,
    attacker: &ClassStats,
    luck: u32,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
    config: &DamageConfig,
) -> DamageResult {
    // 1-3: deterministic scaling
    let mut amount = request.base_power as f64;
    amount *= attacker.damage_multiplier.max(0.0) as f64;
    amount *= request.rank_scaling.max(0.0) as f64;

    // 4: variance
    let (low, high) = variance_bounds(luck, config);
    let variance_seed = compute_seed(seed, 0, 0, roll_context::VARIANCE);
    let variance = rng.range_f64(variance_seed, -low, high);
    amount *= 1.0 + variance;

    // 5: crit
    let critical = roll_crit(rng, seed, attacker.crit_chance);
    if critical {
        amount *= crit_multiplier(request.crit_multiplier, config) as f64;
    }

    // 6: defense after armor penetration
    let pre_defense = amount.round().clamp(0.0, u32::MAX as f64) as u32;
    let defense = effective_defense(request.target_defense, attacker.armor_penetration);
    let amount = pre_defense
        .saturating_sub(defense)
        .max(config.minimum_damage);

    DamageResult {
        amount,
        critical,
        variance,
        pre_defense,
        effective_defense: defense,
    }
}
