//! Skill-specific activation callbacks, dispatched by skill id.
//!
//! Rule code never knows what a skill does. Content registers a behavior
//! per skill; activations of skills without one only play their effect.

use std::collections::BTreeMap;

use crate::character::Character;
use crate::types::SkillId;

use super::instance::Activation;

/// Callback run after a successful activation.
pub trait SkillBehavior: Send + Sync {
    fn on_activate(&self, character: &mut Character, activation: &Activation);
}

impl<F> SkillBehavior for F
where
    F: Fn(&mut Character, &Activation) + Send + Sync,
{
    fn on_activate(&self, character: &mut Character, activation: &Activation) {
        self(character, activation)
    }
}

/// Dispatch table from skill id to behavior.
#[derive(Default)]
pub struct SkillBehaviors {
    behaviors: BTreeMap<SkillId, Box<dyn SkillBehavior>>,
}

impl SkillBehaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `behavior` for `skill`, replacing any previous one.
    pub fn register(&mut self, skill: impl Into<SkillId>, behavior: impl SkillBehavior + 'static) {
        self.behaviors.insert(skill.into(), Box::new(behavior));
    }

    pub fn get(&self, skill: &SkillId) -> Option<&dyn SkillBehavior> {
        self.behaviors.get(skill).map(|behavior| behavior.as_ref())
    }

    /// Runs the behavior for the activated skill. Returns false when none is
    /// registered.
    pub fn dispatch(&self, character: &mut Character, activation: &Activation) -> bool {
        match self.get(&activation.skill) {
            Some(behavior) => {
                behavior.on_activate(character, activation);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl std::fmt::Debug for SkillBehaviors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillBehaviors")
            .field("skills", &self.behaviors.keys().collect::<Vec<_>>())
            .finish()
    }
}
