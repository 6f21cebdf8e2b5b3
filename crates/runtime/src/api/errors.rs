//! Unified error types surfaced by the session API.
//!
//! Wraps rule rejections, content lookups and repository failures so callers
//! can bubble them up with consistent context.

use thiserror::Error;

use progression_core::{
    CannotLearnReason, CannotUseReason, CharacterId, EntityId, ErrorSeverity, GameError,
    HotbarError, SkillId, WorldError,
};

use crate::hooks::HookError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("character {0} is not part of this session")]
    UnknownCharacter(CharacterId),

    #[error("character {0} is already part of this session")]
    DuplicateCharacter(CharacterId),

    #[error("entity {0} was never spawned or already left")]
    UnknownEntity(EntityId),

    #[error("skill '{0}' is not in the catalog")]
    UnknownSkill(SkillId),

    #[error(transparent)]
    CannotLearn(#[from] CannotLearnReason),

    #[error(transparent)]
    CannotUse(#[from] CannotUseReason),

    #[error(transparent)]
    Hotbar(#[from] HotbarError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CannotLearn(e) => e.severity(),
            Self::CannotUse(e) => e.severity(),
            Self::Hotbar(e) => e.severity(),
            Self::World(e) => e.severity(),
            Self::UnknownSkill(_) | Self::UnknownEntity(_) => ErrorSeverity::Validation,
            Self::UnknownCharacter(_) | Self::DuplicateCharacter(_) => ErrorSeverity::Validation,
            Self::Repository(_) | Self::Hook(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "SESSION_UNKNOWN_CHARACTER",
            Self::DuplicateCharacter(_) => "SESSION_DUPLICATE_CHARACTER",
            Self::UnknownEntity(_) => "SESSION_UNKNOWN_ENTITY",
            Self::UnknownSkill(_) => "SESSION_UNKNOWN_SKILL",
            Self::CannotLearn(e) => e.error_code(),
            Self::CannotUse(e) => e.error_code(),
            Self::Hotbar(e) => e.error_code(),
            Self::World(e) => e.error_code(),
            Self::Repository(_) => "SESSION_REPOSITORY",
            Self::Hook(_) => "SESSION_HOOK",
        }
    }
}
