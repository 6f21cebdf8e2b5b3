//! Common error infrastructure for progression-core.
//!
//! Rule guards (`can_learn`, `can_use`, hotbar binding) never fail through
//! panics. They report a reason enum instead, and every reason enum in the
//! crate implements [`GameError`] so callers can classify and log it
//! uniformly.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (cooldown, resources)
/// - **Validation**: the request itself is invalid for the current state
/// - **Internal**: content or state is inconsistent and should be investigated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition. Examples: skill on cooldown, not enough mana.
    Recoverable,

    /// Invalid request. Examples: level too low, unknown hotbar slot.
    Validation,

    /// Inconsistent data. Examples: rank table shorter than max rank.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates broken content or state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all progression-core errors and rejection reasons.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings; UIs and tests match on them
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
