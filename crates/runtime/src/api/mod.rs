//! Public API surface of the runtime crate.
//!
//! Groups the session error type and the reports returned by session
//! operations.

mod errors;
mod reports;

pub use errors::{RepositoryError, Result, SessionError};
pub use reports::{Award, KillReport, SkillUse};
