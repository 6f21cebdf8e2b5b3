//! Oracle lookup errors.

use crate::error::{ErrorSeverity, GameError};
use crate::types::{BossId, SkillId};

/// Errors that occur when content referenced by state is not registered.
///
/// Most lookups degrade instead of failing (unknown bosses count for nothing,
/// unknown content multipliers are neutral). These variants exist for the
/// call sites that need the template to proceed at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("skill template '{0}' not found")]
    SkillNotFound(SkillId),

    #[error("boss '{0}' not registered")]
    BossNotFound(BossId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            Self::BossNotFound(_) => "ORACLE_BOSS_NOT_FOUND",
        }
    }
}
