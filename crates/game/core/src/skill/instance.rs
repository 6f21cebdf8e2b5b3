//! Per-character skill state: rank and remaining cooldown.

use crate::character::ResourcePool;
use crate::job::Job;
use crate::types::{EffectId, SkillId};

use super::book::SkillBook;
use super::error::{CannotLearnReason, CannotUseReason};
use super::template::SkillTemplate;

/// Learner-side inputs of the learn guard.
#[derive(Clone, Copy, Debug)]
pub struct Learner<'a> {
    pub level: u32,
    pub job: Job,
    pub skill_points: u32,
    pub book: &'a SkillBook,
}

/// Result of a successful activation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub skill: SkillId,
    pub rank: u32,
    pub resource_spent: u32,
    /// Cooldown applied, in seconds, after cooldown reduction.
    pub cooldown: f32,
    pub effect: Option<EffectId>,
}

/// One skill of one character. Rank 0 means not learned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInstance {
    pub skill: SkillId,
    rank: u32,
    /// Seconds until the skill can be used again.
    cooldown: f32,
}

impl SkillInstance {
    pub fn new(skill: SkillId) -> Self {
        Self {
            skill,
            rank: 0,
            cooldown: 0.0,
        }
    }

    /// Restores an instance from saved state. Cooldowns are not persisted.
    pub fn with_rank(skill: SkillId, rank: u32) -> Self {
        Self {
            skill,
            rank,
            cooldown: 0.0,
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn is_learned(&self) -> bool {
        self.rank > 0
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    /// First unmet learning condition, `None` if the skill can be learned.
    pub fn cannot_learn_reason(
        &self,
        template: &SkillTemplate,
        learner: &Learner<'_>,
    ) -> Option<CannotLearnReason> {
        if learner.level < template.required_level {
            return Some(CannotLearnReason::LevelTooLow {
                required: template.required_level,
                current: learner.level,
            });
        }

        match template.required_job {
            Some(required) if !learner.job.descends_from(required) => {
                return Some(CannotLearnReason::WrongJob {
                    required,
                    current: learner.job,
                });
            }
            _ => {}
        }

        if self.rank >= template.max_rank {
            return Some(CannotLearnReason::MaxRank {
                max_rank: template.max_rank,
            });
        }

        if learner.skill_points < template.point_cost {
            return Some(CannotLearnReason::NotEnoughPoints {
                required: template.point_cost,
                available: learner.skill_points,
            });
        }

        learner
            .book
            .check_prerequisites(template)
            .map(|missing| CannotLearnReason::MissingPrerequisite {
                skill: missing.skill.clone(),
                min_rank: missing.min_rank,
            })
    }

    pub fn can_learn(&self, template: &SkillTemplate, learner: &Learner<'_>) -> bool {
        self.cannot_learn_reason(template, learner).is_none()
    }

    /// Raises the rank by one. The caller deducts the point cost.
    pub(crate) fn rank_up(&mut self) -> u32 {
        self.rank += 1;
        self.rank
    }

    pub fn cannot_use_reason(
        &self,
        template: &SkillTemplate,
        resources: &ResourcePool,
    ) -> Option<CannotUseReason> {
        if !self.is_learned() {
            return Some(CannotUseReason::NotLearned);
        }
        if self.cooldown > 0.0 {
            return Some(CannotUseReason::OnCooldown {
                remaining: self.cooldown,
            });
        }

        let required = template.resource_cost(self.rank);
        if !resources.has(template.resource, required) {
            return Some(CannotUseReason::InsufficientResource {
                kind: template.resource,
                required,
                available: resources.current(template.resource),
            });
        }
        None
    }

    pub fn can_use(&self, template: &SkillTemplate, resources: &ResourcePool) -> bool {
        self.cannot_use_reason(template, resources).is_none()
    }

    /// Spends the resource cost and starts the cooldown.
    ///
    /// A rejected activation leaves both the instance and the pools untouched.
    pub fn activate(
        &mut self,
        template: &SkillTemplate,
        resources: &mut ResourcePool,
        cooldown_reduction: f32,
    ) -> Result<Activation, CannotUseReason> {
        if let Some(reason) = self.cannot_use_reason(template, resources) {
            return Err(reason);
        }

        let cost = template.resource_cost(self.rank);
        if !resources.spend(template.resource, cost) {
            return Err(CannotUseReason::InsufficientResource {
                kind: template.resource,
                required: cost,
                available: resources.current(template.resource),
            });
        }

        let reduction = if cooldown_reduction.is_finite() {
            cooldown_reduction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.cooldown = (template.cooldown(self.rank) * (1.0 - reduction)).max(0.0);

        Ok(Activation {
            skill: self.skill.clone(),
            rank: self.rank,
            resource_spent: cost,
            cooldown: self.cooldown,
            effect: template.effect.clone(),
        })
    }

    /// Counts the cooldown down by `delta` seconds, never below zero.
    pub fn tick(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.cooldown = (self.cooldown - delta).max(0.0);
        }
    }

    /// Back to rank 0, cooldown cleared. Returns the previous rank.
    pub fn reset(&mut self) -> u32 {
        self.cooldown = 0.0;
        std::mem::take(&mut self.rank)
    }
}
