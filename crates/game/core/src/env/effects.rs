//! Visual/audio effect playback collaborator.

use crate::types::{CharacterId, EffectId, Position};

/// Plays effects by id. The engine never knows what an effect looks like.
pub trait EffectRegistry: Send + Sync {
    fn play_effect(&self, effect: &EffectId, position: Position, intensity: f32);

    fn play_effect_on_character(&self, effect: &EffectId, character: CharacterId, intensity: f32);
}

/// Registry that discards every request (headless servers, unit tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentEffects;

impl EffectRegistry for SilentEffects {
    fn play_effect(&self, _effect: &EffectId, _position: Position, _intensity: f32) {}

    fn play_effect_on_character(
        &self,
        _effect: &EffectId,
        _character: CharacterId,
        _intensity: f32,
    ) {
    }
}
