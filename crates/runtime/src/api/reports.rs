//! Outcomes returned by session operations.

use serde::{Deserialize, Serialize};

use progression_core::{
    Activation, BossKillOutcome, CharacterId, DamageResult, EntityId, LevelUpReport, XpBreakdown,
};

/// Result of a skill use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillUse {
    pub activation: Activation,
    /// Resolved hit when the skill targeted a live entity and deals damage.
    pub hit: Option<DamageResult>,
}

/// Experience granted to one character for a kill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub character: CharacterId,
    pub xp: u64,
    pub level_up: LevelUpReport,
}

/// Everything that happened when an entity died.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KillReport {
    pub entity: EntityId,
    pub name: String,
    pub xp: XpBreakdown,
    /// Empty when nobody was eligible.
    pub awards: Vec<Award>,
    /// Set for boss kills only.
    pub boss: Option<BossKillOutcome>,
}

impl KillReport {
    pub fn award(&self, character: CharacterId) -> Option<&Award> {
        self.awards.iter().find(|award| award.character == character)
    }

    pub fn rewarded(&self) -> bool {
        !self.awards.is_empty()
    }
}
