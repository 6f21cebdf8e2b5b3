//! Traits describing read-only content and external collaborators.
//!
//! Oracles expose skill templates, boss progression data, third-party content
//! multipliers, the effect registry, and randomness. Every collaborator is an
//! explicitly constructed object handed to the engine, so tests can build
//! isolated instances.
mod bosses;
mod content;
mod effects;
mod error;
mod rng;
mod skills;

pub use bosses::{BossOracle, BossProgression, StaticBossTable};
pub use content::{ContentOracle, NeutralContent};
pub use effects::{EffectRegistry, SilentEffects};
pub use error::OracleError;
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed, roll_context};
pub use skills::{SkillOracle, StaticSkillTable};
