//! Runtime orchestration for the progression engine.
//!
//! This crate wires the pure rules of `progression-core` and the content of
//! `progression-content` into a single-threaded [`Session`] the host game
//! drives with ticks, spawns, damage reports and deaths.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and its configuration
//! - [`api`] exposes the error and report types callers interact with
//! - [`events`] provides the topic-based event bus
//! - [`hooks`] provides spawn scaling and post-kill hooks
//! - [`commands`] parses and executes the text command surface
//! - [`effects`] provides effect registry implementations
//! - [`oracle`] and [`repository`] provide content and persistence adapters
pub mod api;
pub mod commands;
pub mod effects;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod repository;
pub mod session;

pub use api::{Award, KillReport, RepositoryError, Result, SessionError, SkillUse};
pub use commands::{Command, CommandError, CommandKind};
pub use effects::{EffectTarget, PlayedEffect, RecordingEffects, TracingEffects};
pub use events::{CombatEvent, Event, EventBus, ProgressionEvent, Topic, WorldStateEvent};
pub use hooks::{
    HookContext, HookCriticality, HookError, HookRegistry, KillHook, LevelUpEffectHook,
    WorldLevelEffectHook, spawn_scaling_for,
};
pub use oracle::{ContentRegistry, OracleManager};
pub use repository::{
    CharacterRepository, FileCharacterRepository, FileWorldRepository, InMemoryCharacterRepo,
    InMemoryWorldRepo, WorldRepository,
};
pub use session::{Session, SessionConfig};
