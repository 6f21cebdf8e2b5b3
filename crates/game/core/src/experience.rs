//! Kill experience pipeline and distribution.
//!
//! ```text
//! base (life/defense, or boss curve)
//!   × world level      (effective level for pre-hardmode content)
//!   × monster level    (regular mobs only)
//!   × event            (highest active, no stacking)
//!   × external content
//!   × external difficulty
//!   → floor 1
//! ```

use crate::config::ProgressionConfig;
use crate::entity::{EntityDescriptor, EntityKind};
use crate::env::{BossOracle, ContentOracle};
use crate::formula::{
    base_kill_xp, boss_baseline_xp, event_multiplier, monster_level_multiplier,
    sanitize_multiplier, world_level_multiplier,
};
use crate::types::CharacterId;
use crate::world::{WorldEvents, WorldProgressionState};

/// Every factor of one kill reward, for logs and debug output.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpBreakdown {
    pub base: f64,
    pub world: f64,
    pub monster: f64,
    pub event: f64,
    pub content: f64,
    pub difficulty: f64,
    /// Final award per eligible contributor.
    pub total: u64,
}

/// Computes kill rewards from content oracles and balance parameters.
pub struct ExperienceEngine<'a> {
    config: &'a ProgressionConfig,
    bosses: &'a dyn BossOracle,
    content: &'a dyn ContentOracle,
}

impl<'a> ExperienceEngine<'a> {
    pub fn new(
        config: &'a ProgressionConfig,
        bosses: &'a dyn BossOracle,
        content: &'a dyn ContentOracle,
    ) -> Self {
        Self {
            config,
            bosses,
            content,
        }
    }

    /// Baseline reward of a regular kill, at least 1.
    pub fn calculate_base_xp(&self, entity: &EntityDescriptor) -> f64 {
        base_kill_xp(entity.max_life, entity.defense, &self.config.experience)
    }

    /// Baseline reward of a boss kill, adjusted by the catch-up curve.
    pub fn calculate_boss_xp(&self, boss_level: u32, average_party_level: f64) -> f64 {
        boss_baseline_xp(boss_level, average_party_level, &self.config.experience)
    }

    /// Full pipeline for one kill.
    ///
    /// Bosses whose content is not registered fall back to the regular
    /// baseline from their life and defense.
    pub fn kill_xp(
        &self,
        entity: &EntityDescriptor,
        world: &WorldProgressionState,
        events: &WorldEvents,
        average_party_level: f64,
    ) -> XpBreakdown {
        let experience = &self.config.experience;

        let (base, monster) = match &entity.kind {
            EntityKind::Boss(id) => match self.bosses.boss(id) {
                Some(boss) => (self.calculate_boss_xp(boss.level, average_party_level), 1.0),
                None => (self.calculate_base_xp(entity), 1.0),
            },
            EntityKind::Regular => (
                self.calculate_base_xp(entity),
                monster_level_multiplier(entity.level, experience),
            ),
        };

        let world_level = world.world_level_for(entity, self.config);
        let world = world_level_multiplier(world_level, experience);
        let event = event_multiplier(events, &experience.events);
        let content = sanitize_multiplier(self.content.external_content_xp_multiplier(entity));
        let difficulty = sanitize_multiplier(self.content.external_difficulty_scale());

        let raw = base * world * monster * event * content * difficulty;
        let total = if raw.is_finite() {
            raw.round().clamp(1.0, u64::MAX as f64) as u64
        } else {
            1
        };

        XpBreakdown {
            base,
            world,
            monster,
            event,
            content,
            difficulty,
            total,
        }
    }
}

/// Equal award: every eligible contributor receives the full amount.
pub fn distribute_xp(eligible: &[CharacterId], xp: u64) -> Vec<(CharacterId, u64)> {
    eligible.iter().map(|character| (*character, xp)).collect()
}
