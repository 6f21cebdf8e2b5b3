//! Runtime bundle of the core oracle traits.
//!
//! Content is immutable at runtime and shared behind `Arc`s, so a session and
//! any tooling can hold the same [`OracleManager`]. Dynamic state lives in the
//! session and its repositories.
mod content;

use std::sync::Arc;

use progression_content::GameContent;
use progression_core::{
    BossOracle, ContentOracle, EffectRegistry, NeutralContent, PcgRng, ProgressionConfig,
    SkillBehaviors, SkillOracle,
};

use crate::effects::TracingEffects;

pub use content::ContentRegistry;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) config: Arc<ProgressionConfig>,
    pub(crate) skills: Arc<dyn SkillOracle>,
    pub(crate) bosses: Arc<dyn BossOracle>,
    pub(crate) content: Arc<dyn ContentOracle>,
    pub(crate) effects: Arc<dyn EffectRegistry>,
    pub(crate) behaviors: Arc<SkillBehaviors>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager with neutral content multipliers, logged
    /// effects and no skill behaviors.
    pub fn new(
        config: ProgressionConfig,
        skills: Arc<dyn SkillOracle>,
        bosses: Arc<dyn BossOracle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            skills,
            bosses,
            content: Arc::new(NeutralContent),
            effects: Arc::new(TracingEffects),
            behaviors: Arc::new(SkillBehaviors::new()),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Builds the bundle from loaded content.
    pub fn from_content(content: GameContent) -> Self {
        Self::new(
            content.config,
            Arc::new(content.skills),
            Arc::new(content.bosses),
        )
    }

    /// Replaces the third-party content multipliers.
    pub fn with_content(mut self, content: Arc<dyn ContentOracle>) -> Self {
        self.content = content;
        self
    }

    /// Replaces the effect registry.
    pub fn with_effects(mut self, effects: Arc<dyn EffectRegistry>) -> Self {
        self.effects = effects;
        self
    }

    /// Replaces the skill behavior dispatch table.
    pub fn with_behaviors(mut self, behaviors: SkillBehaviors) -> Self {
        self.behaviors = Arc::new(behaviors);
        self
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn skills(&self) -> &dyn SkillOracle {
        self.skills.as_ref()
    }

    pub fn bosses(&self) -> &dyn BossOracle {
        self.bosses.as_ref()
    }

    pub fn content(&self) -> &dyn ContentOracle {
        self.content.as_ref()
    }

    pub fn effects(&self) -> &dyn EffectRegistry {
        self.effects.as_ref()
    }

    pub fn behaviors(&self) -> &SkillBehaviors {
        &self.behaviors
    }
}
