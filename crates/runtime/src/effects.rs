//! Effect registry implementations.
//!
//! Presentation lives outside this workspace; the session only asks an
//! injected [`EffectRegistry`] to play effects. [`TracingEffects`] logs each
//! request and [`RecordingEffects`] keeps them for inspection in tests and
//! tools.

use std::sync::Mutex;

use progression_core::{CharacterId, EffectId, EffectRegistry, Position};

/// Where an effect was requested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectTarget {
    Position(Position),
    Character(CharacterId),
}

/// One recorded effect request.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedEffect {
    pub effect: EffectId,
    pub target: EffectTarget,
    pub intensity: f32,
}

/// Logs every request at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEffects;

impl EffectRegistry for TracingEffects {
    fn play_effect(&self, effect: &EffectId, position: Position, intensity: f32) {
        tracing::debug!(
            target: "runtime::effects",
            %effect,
            x = position.x,
            y = position.y,
            intensity,
            "play effect"
        );
    }

    fn play_effect_on_character(&self, effect: &EffectId, character: CharacterId, intensity: f32) {
        tracing::debug!(
            target: "runtime::effects",
            %effect,
            %character,
            intensity,
            "play effect on character"
        );
    }
}

/// Keeps every request in order.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    played: Mutex<Vec<PlayedEffect>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every request so far.
    pub fn played(&self) -> Vec<PlayedEffect> {
        self.played
            .lock()
            .map(|played| played.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut played) = self.played.lock() {
            played.clear();
        }
    }

    fn push(&self, effect: &EffectId, target: EffectTarget, intensity: f32) {
        if let Ok(mut played) = self.played.lock() {
            played.push(PlayedEffect {
                effect: effect.clone(),
                target,
                intensity,
            });
        }
    }
}

impl EffectRegistry for RecordingEffects {
    fn play_effect(&self, effect: &EffectId, position: Position, intensity: f32) {
        self.push(effect, EffectTarget::Position(position), intensity);
    }

    fn play_effect_on_character(&self, effect: &EffectId, character: CharacterId, intensity: f32) {
        self.push(effect, EffectTarget::Character(character), intensity);
    }
}
