//! Spawn-time monster scaling.

use crate::config::WorldConfig;

/// Multipliers applied to a hostile entity's base stats when it spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnScaling {
    pub life: f32,
    pub damage: f32,
}

impl SpawnScaling {
    pub const NEUTRAL: Self = Self {
        life: 1.0,
        damage: 1.0,
    };

    /// Applies the life multiplier to a base value, at least 1.
    pub fn scale_life(&self, base: u32) -> u32 {
        ((base as f32 * self.life).round() as u32).max(1)
    }

    pub fn scale_damage(&self, base: u32) -> u32 {
        (base as f32 * self.damage).round() as u32
    }
}

/// Scaling for an entity spawning at `world_level`.
///
/// The caller picks raw or effective world level depending on the entity's
/// pre-hardmode classification.
pub fn spawn_scaling(world_level: u32, config: &WorldConfig) -> SpawnScaling {
    let level = world_level as f32;
    SpawnScaling {
        life: (1.0 + level * config.hp_per_world_level).max(0.0),
        damage: (1.0 + level * config.damage_per_world_level).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_level_zero_is_neutral() {
        assert_eq!(spawn_scaling(0, &WorldConfig::default()), SpawnScaling::NEUTRAL);
    }

    #[test]
    fn scaling_grows_with_world_level() {
        let config = WorldConfig::default();
        let scaling = spawn_scaling(25, &config);
        assert_eq!(scaling.scale_life(100), 200);
        assert_eq!(scaling.scale_damage(100), 150);
    }
}
