//! Hooks around the entity lifecycle.
//!
//! - [`spawn_scaling_for`] scales a spawning entity by world level.
//! - [`KillHook`]s run after a kill has been fully resolved (XP awarded, boss
//!   ledger updated) and react to the [`KillReport`](crate::api::KillReport),
//!   typically by asking the effect registry to celebrate.
//!
//! Hooks are registered on the [`HookRegistry`] and evaluated in priority
//! order. They observe the session; they never change progression state.

mod context;
mod effects;
mod registry;
mod spawn;

pub use context::HookContext;
pub use effects::{LevelUpEffectHook, WorldLevelEffectHook};
pub use registry::HookRegistry;
pub use spawn::spawn_scaling_for;

use thiserror::Error;

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks surface their failure to the caller of the kill
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure is returned from the kill operation. Progression changes
    /// made by the kill are kept.
    Critical,

    /// Hook failure should be logged as error but allow continuation.
    Important,

    /// Hook failure is expected and can be silently ignored.
    ///
    /// Use for cosmetic effects that don't impact progression.
    Optional,
}

/// Failure reported by a hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hook '{hook}' failed: {reason}")]
pub struct HookError {
    pub hook: &'static str,
    pub reason: String,
}

impl HookError {
    pub fn new(hook: &'static str, reason: impl Into<String>) -> Self {
        Self {
            hook,
            reason: reason.into(),
        }
    }
}

/// Post-kill hook.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: bookkeeping that others may depend on
/// - Zero: Default priority for most hooks
/// - Positive priorities: Optional or cosmetic hooks
pub trait KillHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Returns the execution priority. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    /// Returns the criticality level of this hook for error handling.
    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Determines whether this hook should run for the given kill.
    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    /// Runs the hook.
    fn execute(&self, ctx: &HookContext<'_>) -> Result<(), HookError>;
}
