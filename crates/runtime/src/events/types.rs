//! Event types for different topics.

use serde::{Deserialize, Serialize};

use progression_core::{
    BossId, BossKillOutcome, CharacterId, DamageResult, DamageSource, EntityId, LevelCapTier,
    LevelUpReport, SkillId, Tick, WorldEvent,
};

use crate::api::KillReport;

/// Events related to fights: skill use, hits, deaths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    SkillUsed {
        character: CharacterId,
        skill: SkillId,
        rank: u32,
        hit: Option<DamageResult>,
        clock: Tick,
    },

    /// Damage reported against a hostile entity. `credited` is the character
    /// the attribution map recorded it for, if any.
    DamageRecorded {
        entity: EntityId,
        source: DamageSource,
        amount: u32,
        credited: Option<CharacterId>,
        clock: Tick,
    },

    EntityKilled {
        report: Box<KillReport>,
        clock: Tick,
    },

    /// Entity left without dying; its attribution map was discarded.
    EntityDespawned { entity: EntityId, clock: Tick },
}

/// Events related to one character's progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressionEvent {
    ExperienceGained {
        character: CharacterId,
        amount: u64,
        clock: Tick,
    },

    LevelUp {
        character: CharacterId,
        report: LevelUpReport,
    },

    SkillLearned {
        character: CharacterId,
        skill: SkillId,
        rank: u32,
    },

    SkillsReset {
        character: CharacterId,
        refunded: u32,
    },

    CharacterReset { character: CharacterId },
}

/// Events related to the shared world state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldStateEvent {
    BossKilled {
        boss: BossId,
        outcome: BossKillOutcome,
    },

    WorldLevelChanged {
        previous: u32,
        world_level: u32,
        level_cap: u32,
        tier: LevelCapTier,
    },

    EventStarted(WorldEvent),
    EventEnded(WorldEvent),
}
