//! Deterministic progression rules shared by the runtime and offline tools.
//!
//! `progression-core` defines skills, damage resolution, damage attribution,
//! experience and world progression as pure APIs. Content is reached through
//! the oracle traits in [`env`]; randomness through a seedable
//! [`RngOracle`](env::RngOracle). Nothing here performs I/O or logs.
pub mod attribution;
pub mod character;
pub mod combat;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod experience;
pub mod formula;
pub mod job;
pub mod skill;
pub mod types;
pub mod world;

pub use attribution::{
    AttributionLedger, AttributionWindow, Contribution, DamageAttributionMap, DamageSource,
};
pub use character::{
    Attribute, Attributes, Character, CharacterProgression, CharacterSave, DerivedStats,
    LevelUpReport, PassiveBonuses, PointError, PointPool, ResourceKind, ResourcePool, StatKind,
};
pub use combat::{
    ClassStats, ClassTable, DamageClass, DamageRequest, DamageResult, resolve_damage,
};
pub use config::{
    AttributionConfig, DamageConfig, EventMultipliers, ExperienceConfig, LevelingConfig,
    ProgressionConfig, WorldConfig,
};
pub use entity::{EntityDescriptor, EntityKind};
pub use env::{
    BossOracle, BossProgression, ContentOracle, EffectRegistry, NeutralContent, OracleError,
    PcgRng, RngOracle, SilentEffects, SkillOracle, StaticBossTable, StaticSkillTable,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use experience::{ExperienceEngine, XpBreakdown, distribute_xp};
pub use formula::{SpawnScaling, spawn_scaling, xp_required_for_level};
pub use job::{Job, JobError};
pub use skill::{
    Activation, CannotLearnReason, CannotUseReason, HotbarError, Prerequisite, RankTables,
    SkillBehavior, SkillBehaviors, SkillBook, SkillInstance, SkillKind, SkillTemplate,
    TemplateError, validate_catalog,
};
pub use types::{BossId, CharacterId, EffectId, EntityId, Position, SkillId, Tick};
pub use world::{
    BossContribution, BossKillOutcome, LevelCapTier, WorldError, WorldEvent, WorldEvents,
    WorldProgressionState,
};
