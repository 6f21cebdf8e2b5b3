//! Skill rejection reasons and content validation errors.

use crate::character::ResourceKind;
use crate::error::{ErrorSeverity, GameError};
use crate::job::Job;
use crate::types::SkillId;

/// First unmet learning condition.
///
/// Conditions are checked in declaration order: level, job, max rank,
/// points, prerequisite. UIs rely on this order for stable messages.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CannotLearnReason {
    #[error("requires level {required} (currently {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires the {required} job line (currently {current})")]
    WrongJob { required: Job, current: Job },

    #[error("already at max rank {max_rank}")]
    MaxRank { max_rank: u32 },

    #[error("needs {required} skill points ({available} available)")]
    NotEnoughPoints { required: u32, available: u32 },

    #[error("requires {skill} at rank {min_rank}")]
    MissingPrerequisite { skill: SkillId, min_rank: u32 },
}

impl GameError for CannotLearnReason {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LevelTooLow { .. } => "LEARN_LEVEL_TOO_LOW",
            Self::WrongJob { .. } => "LEARN_WRONG_JOB",
            Self::MaxRank { .. } => "LEARN_MAX_RANK",
            Self::NotEnoughPoints { .. } => "LEARN_NOT_ENOUGH_POINTS",
            Self::MissingPrerequisite { .. } => "LEARN_MISSING_PREREQUISITE",
        }
    }
}

/// Why a skill cannot be activated right now.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CannotUseReason {
    #[error("skill not learned")]
    NotLearned,

    #[error("on cooldown for {remaining:.1}s")]
    OnCooldown { remaining: f32 },

    #[error("needs {required} {kind} ({available} available)")]
    InsufficientResource {
        kind: ResourceKind,
        required: u32,
        available: u32,
    },
}

impl GameError for CannotUseReason {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotLearned => ErrorSeverity::Validation,
            Self::OnCooldown { .. } | Self::InsufficientResource { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotLearned => "USE_NOT_LEARNED",
            Self::OnCooldown { .. } => "USE_ON_COOLDOWN",
            Self::InsufficientResource { .. } => "USE_INSUFFICIENT_RESOURCE",
        }
    }
}

/// Rejected hotbar binding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HotbarError {
    #[error("hotbar slot {slot} out of range (0..{slots})")]
    InvalidSlot { slot: usize, slots: usize },

    #[error("skill {0} is not learned")]
    NotLearned(SkillId),
}

impl GameError for HotbarError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "HOTBAR_INVALID_SLOT",
            Self::NotLearned(_) => "HOTBAR_NOT_LEARNED",
        }
    }
}

/// Invalid skill content, detected at load time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("skill {0}: max rank must be at least 1")]
    ZeroMaxRank(SkillId),

    #[error("skill {skill}: {table} table has {found} entries, expected {expected}")]
    RankTableLength {
        skill: SkillId,
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("skill {skill}: cooldown at rank {rank} must be finite and non-negative")]
    InvalidCooldown { skill: SkillId, rank: u32 },

    #[error("skill {skill}: cooldown increases at rank {rank}")]
    CooldownIncreases { skill: SkillId, rank: u32 },

    #[error("skill {0}: damage scaling must be finite and non-negative")]
    InvalidDamageScaling(SkillId),

    #[error("skill {0} lists itself as a prerequisite")]
    SelfPrerequisite(SkillId),

    #[error("skill {skill}: prerequisite {prerequisite} needs a minimum rank of at least 1")]
    ZeroPrerequisiteRank { skill: SkillId, prerequisite: SkillId },

    #[error("skill {skill}: unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { skill: SkillId, prerequisite: SkillId },

    #[error("skill {skill}: prerequisite {prerequisite} rank {min_rank} exceeds its max rank {max_rank}")]
    UnreachablePrerequisiteRank {
        skill: SkillId,
        prerequisite: SkillId,
        min_rank: u32,
        max_rank: u32,
    },

    #[error("prerequisite cycle: {}", format_cycle(.0))]
    PrerequisiteCycle(Vec<SkillId>),

    #[error("duplicate skill id {0}")]
    Duplicate(SkillId),
}

fn format_cycle(cycle: &[SkillId]) -> String {
    cycle
        .iter()
        .map(SkillId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroMaxRank(_) => "TEMPLATE_ZERO_MAX_RANK",
            Self::RankTableLength { .. } => "TEMPLATE_RANK_TABLE_LENGTH",
            Self::InvalidCooldown { .. } => "TEMPLATE_INVALID_COOLDOWN",
            Self::CooldownIncreases { .. } => "TEMPLATE_COOLDOWN_INCREASES",
            Self::InvalidDamageScaling(_) => "TEMPLATE_INVALID_DAMAGE_SCALING",
            Self::SelfPrerequisite(_) => "TEMPLATE_SELF_PREREQUISITE",
            Self::ZeroPrerequisiteRank { .. } => "TEMPLATE_ZERO_PREREQUISITE_RANK",
            Self::UnknownPrerequisite { .. } => "TEMPLATE_UNKNOWN_PREREQUISITE",
            Self::UnreachablePrerequisiteRank { .. } => "TEMPLATE_UNREACHABLE_PREREQUISITE",
            Self::PrerequisiteCycle(_) => "TEMPLATE_PREREQUISITE_CYCLE",
            Self::Duplicate(_) => "TEMPLATE_DUPLICATE",
        }
    }
}
