//! Damage resolution.
//!
//! Pure functions turning a damage request into the value applied to the
//! target. The pipeline order is fixed:
//!
//! 1. base power (skill or weapon)
//! 2. class damage multiplier
//! 3. per-rank scaling (value from the skill's rank table)
//! 4. variance, narrowed by luck (random)
//! 5. critical roll (random)
//! 6. target defense after armor penetration
//!
//! Steps 4 and 5 draw from an injected [`RngOracle`](crate::env::RngOracle);
//! everything else is deterministic.

pub mod crit;
pub mod damage;
pub mod result;

pub use crit::{crit_multiplier, roll_crit};
pub use damage::{
    ClassStats, ClassTable, DamageClass, DamageRequest, effective_defense, resolve_damage,
    variance_bounds,
};
pub use result::DamageResult;
