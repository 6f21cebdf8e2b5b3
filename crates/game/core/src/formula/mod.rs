//! Formula engine.
//!
//! Stateless functions mapping levels, world level and event state to
//! multipliers and curves. Every multiplier returned here is finite and
//! non-negative; callers compose them multiplicatively.

mod curves;
mod scaling;

pub use curves::{
    base_kill_xp, boss_baseline_xp, boss_catch_up_factor, event_multiplier,
    monster_level_multiplier, total_xp_for_level, world_level_multiplier,
    xp_required_for_level,
};
pub use scaling::{SpawnScaling, spawn_scaling};

/// Replaces NaN, infinities and negative values with the neutral multiplier.
///
/// External collaborators feed values into the pipeline; a broken one must
/// degrade to "no effect" rather than poison the result.
pub fn sanitize_multiplier(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_valid_values() {
        assert_eq!(sanitize_multiplier(0.0), 0.0);
        assert_eq!(sanitize_multiplier(2.5), 2.5);
    }

    #[test]
    fn sanitize_neutralizes_garbage() {
        assert_eq!(sanitize_multiplier(f64::NAN), 1.0);
        assert_eq!(sanitize_multiplier(f64::INFINITY), 1.0);
        assert_eq!(sanitize_multiplier(-3.0), 1.0);
    }
}
