//! Skills: immutable templates, per-character instances and the skill book.
//!
//! Guards never panic or return errors for rule violations; they return a
//! reason (`CannotLearnReason`, `CannotUseReason`, `HotbarError`) and leave
//! state untouched.

mod behavior;
mod book;
mod error;
mod graph;
mod instance;
mod template;

pub use behavior::{SkillBehavior, SkillBehaviors};
pub use book::{Hotbar, SkillBook};
pub use error::{CannotLearnReason, CannotUseReason, HotbarError, TemplateError};
pub use graph::validate_catalog;
pub use instance::{Activation, Learner, SkillInstance};
pub use template::{
    PassiveEffect, Prerequisite, Prerequisites, RankTables, SkillKind, SkillTemplate,
};
