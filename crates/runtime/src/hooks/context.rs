//! Execution context provided to hooks during evaluation.

use progression_core::{Tick, WorldProgressionState};

use crate::api::KillReport;
use crate::oracle::OracleManager;

/// Context provided to hooks when evaluating whether to trigger.
///
/// Read-only view of the resolved kill and the world after it.
pub struct HookContext<'a> {
    /// The kill that was just resolved
    pub report: &'a KillReport,

    /// World state after XP and boss progression were applied
    pub world: &'a WorldProgressionState,

    /// Oracle manager for accessing content and the effect registry
    pub oracles: &'a OracleManager,

    pub clock: Tick,
}
