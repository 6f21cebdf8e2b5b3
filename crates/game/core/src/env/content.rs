//! Hooks for third-party content packs to adjust experience rewards.

use crate::entity::EntityDescriptor;

/// External multipliers consulted at the end of the XP pipeline.
///
/// Both methods default to the neutral value so a content pack only
/// overrides what it cares about.
pub trait ContentOracle: Send + Sync {
    /// Multiplier a content pack applies to kills of `entity`.
    fn external_content_xp_multiplier(&self, _entity: &EntityDescriptor) -> f64 {
        1.0
    }

    /// Global difficulty scale installed by a difficulty-altering pack.
    fn external_difficulty_scale(&self) -> f64 {
        1.0
    }
}

/// No external content installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralContent;

impl ContentOracle for NeutralContent {}
