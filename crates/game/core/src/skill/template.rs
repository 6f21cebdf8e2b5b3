//! Immutable skill definitions shared by every character.

use arrayvec::ArrayVec;

use crate::character::{ResourceKind, StatKind};
use crate::combat::DamageClass;
use crate::config::ProgressionConfig;
use crate::job::Job;
use crate::types::{EffectId, SkillId};

use super::error::TemplateError;

/// Broad category of a skill.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    #[default]
    Active,
    Passive,
    Buff,
    Debuff,
    Movement,
    Utility,
}

/// Per-rank values, indexed by `rank - 1`.
///
/// Every table holds exactly `max_rank` entries once the template is
/// validated. Rank 0 (unlearned) reads as zero everywhere.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankTables {
    /// Damage scaling applied in step 3 of damage resolution.
    pub damage: Vec<f32>,
    /// Effect duration in seconds.
    pub duration: Vec<f32>,
    pub resource_cost: Vec<u32>,
    /// Cooldown in seconds. Non-increasing with rank.
    pub cooldown: Vec<f32>,
}

impl RankTables {
    fn lookup<T: Copy + Default>(table: &[T], rank: u32) -> T {
        match rank {
            0 => T::default(),
            rank => table
                .get(rank as usize - 1)
                .or_else(|| table.last())
                .copied()
                .unwrap_or_default(),
        }
    }

    pub fn damage(&self, rank: u32) -> f32 {
        Self::lookup(&self.damage, rank)
    }

    pub fn duration(&self, rank: u32) -> f32 {
        Self::lookup(&self.duration, rank)
    }

    pub fn resource_cost(&self, rank: u32) -> u32 {
        Self::lookup(&self.resource_cost, rank)
    }

    pub fn cooldown(&self, rank: u32) -> f32 {
        Self::lookup(&self.cooldown, rank)
    }
}

/// Another skill that must reach `min_rank` first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prerequisite {
    pub skill: SkillId,
    pub min_rank: u32,
}

impl Prerequisite {
    pub fn new(skill: impl Into<SkillId>, min_rank: u32) -> Self {
        Self {
            skill: skill.into(),
            min_rank,
        }
    }
}

/// Stat bonus granted by a learned passive skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveEffect {
    pub stat: StatKind,
    /// Bonus at each rank, indexed by `rank - 1`.
    pub per_rank: Vec<f32>,
}

impl PassiveEffect {
    pub fn value(&self, rank: u32) -> f32 {
        RankTables::lookup(&self.per_rank, rank)
    }
}

pub type Prerequisites = ArrayVec<Prerequisite, { ProgressionConfig::MAX_PREREQUISITES }>;

/// Skill definition loaded from content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SkillKind,
    /// `None` means any job may learn it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_job: Option<Job>,
    #[cfg_attr(feature = "serde", serde(default = "default_one"))]
    pub required_level: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_one"))]
    pub point_cost: u32,
    pub max_rank: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranks: RankTables,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource: ResourceKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Prerequisites,
    /// Overrides the configured crit multiplier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_multiplier: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_class: DamageClass,
    /// Base power used in step 1 of damage resolution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<EffectId>,
}

#[cfg(feature = "serde")]
fn default_one() -> u32 {
    1
}

impl SkillTemplate {
    /// Minimal template with one rank and no requirements.
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            required_job: None,
            required_level: 1,
            point_cost: 1,
            max_rank: 1,
            ranks: RankTables {
                damage: vec![1.0],
                duration: vec![0.0],
                resource_cost: vec![0],
                cooldown: vec![0.0],
            },
            resource: ResourceKind::None,
            prerequisites: Prerequisites::new(),
            crit_multiplier: None,
            damage_class: DamageClass::default(),
            base_power: 0,
            passive: None,
            effect: None,
        }
    }

    #[must_use]
    pub fn with_requirements(mut self, job: Option<Job>, level: u32, point_cost: u32) -> Self {
        self.required_job = job;
        self.required_level = level;
        self.point_cost = point_cost;
        self
    }

    /// Sets `max_rank` and the rank tables together.
    #[must_use]
    pub fn with_ranks(mut self, ranks: RankTables) -> Self {
        self.max_rank = ranks.damage.len() as u32;
        self.ranks = ranks;
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = resource;
        self
    }

    /// Adds a prerequisite. Extra entries beyond the fixed capacity are
    /// dropped; use `validate` on loaded content instead of relying on this.
    #[must_use]
    pub fn with_prerequisite(mut self, skill: impl Into<SkillId>, min_rank: u32) -> Self {
        let _ = self.prerequisites.try_push(Prerequisite::new(skill, min_rank));
        self
    }

    #[must_use]
    pub fn with_damage(mut self, class: DamageClass, base_power: u32) -> Self {
        self.damage_class = class;
        self.base_power = base_power;
        self
    }

    #[must_use]
    pub fn with_passive(mut self, stat: StatKind, per_rank: Vec<f32>) -> Self {
        self.passive = Some(PassiveEffect { stat, per_rank });
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    /// Cooldown in seconds at `rank`, before cooldown reduction.
    pub fn cooldown(&self, rank: u32) -> f32 {
        self.ranks.cooldown(rank).max(0.0)
    }

    pub fn resource_cost(&self, rank: u32) -> u32 {
        self.ranks.resource_cost(rank)
    }

    /// Passive stat contribution at `rank`, if the skill has one.
    pub fn passive_bonus(&self, rank: u32) -> Option<(StatKind, f32)> {
        if rank == 0 {
            return None;
        }
        self.passive
            .as_ref()
            .map(|passive| (passive.stat, passive.value(rank)))
    }

    /// Checks the template in isolation. Cross-template rules live in
    /// [`validate_catalog`](super::validate_catalog).
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.max_rank == 0 {
            return Err(TemplateError::ZeroMaxRank(self.id.clone()));
        }

        let expected = self.max_rank as usize;
        let lengths = [
            ("damage", self.ranks.damage.len()),
            ("duration", self.ranks.duration.len()),
            ("resource_cost", self.ranks.resource_cost.len()),
            ("cooldown", self.ranks.cooldown.len()),
        ];
        let passive = self
            .passive
            .as_ref()
            .map(|passive| ("passive", passive.per_rank.len()));
        for (table, found) in lengths.into_iter().chain(passive) {
            if found != expected {
                return Err(TemplateError::RankTableLength {
                    skill: self.id.clone(),
                    table,
                    expected,
                    found,
                });
            }
        }

        let mut previous = f32::INFINITY;
        for (index, cooldown) in self.ranks.cooldown.iter().copied().enumerate() {
            let rank = index as u32 + 1;
            if !cooldown.is_finite() || cooldown < 0.0 {
                return Err(TemplateError::InvalidCooldown {
                    skill: self.id.clone(),
                    rank,
                });
            }
            if cooldown > previous {
                return Err(TemplateError::CooldownIncreases {
                    skill: self.id.clone(),
                    rank,
                });
            }
            previous = cooldown;
        }

        if self.ranks.damage.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(TemplateError::InvalidDamageScaling(self.id.clone()));
        }

        for prerequisite in &self.prerequisites {
            if prerequisite.skill == self.id {
                return Err(TemplateError::SelfPrerequisite(self.id.clone()));
            }
            if prerequisite.min_rank == 0 {
                return Err(TemplateError::ZeroPrerequisiteRank {
                    skill: self.id.clone(),
                    prerequisite: prerequisite.skill.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fireball() -> SkillTemplate {
        SkillTemplate::new("mage.fireball", "Fireball", SkillKind::Active)
            .with_ranks(RankTables {
                damage: vec![1.0, 1.25, 1.5],
                duration: vec![0.0; 3],
                resource_cost: vec![10, 12, 14],
                cooldown: vec![6.0, 5.0, 4.0],
            })
            .with_resource(ResourceKind::Mana)
            .with_damage(DamageClass::Magic, 40)
    }

    #[test]
    fn rank_zero_reads_as_zero() {
        let template = fireball();
        assert_eq!(template.ranks.damage(0), 0.0);
        assert_eq!(template.resource_cost(0), 0);
        assert_eq!(template.cooldown(0), 0.0);
    }

    #[test]
    fn tables_index_by_rank() {
        let template = fireball();
        assert_eq!(template.max_rank, 3);
        assert_eq!(template.ranks.damage(2), 1.25);
        assert_eq!(template.resource_cost(3), 14);
        assert_eq!(template.cooldown(1), 6.0);
    }

    #[test]
    fn valid_template_passes() {
        assert_eq!(fireball().validate(), Ok(()));
    }

    #[test]
    fn short_table_is_rejected() {
        let mut template = fireball();
        template.ranks.resource_cost.pop();

        assert_eq!(
            template.validate(),
            Err(TemplateError::RankTableLength {
                skill: template.id.clone(),
                table: "resource_cost",
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn increasing_cooldown_is_rejected() {
        let mut template = fireball();
        template.ranks.cooldown = vec![4.0, 5.0, 3.0];

        assert_eq!(
            template.validate(),
            Err(TemplateError::CooldownIncreases {
                skill: template.id.clone(),
                rank: 2,
            })
        );
    }

    #[test]
    fn self_prerequisite_is_rejected() {
        let template = fireball().with_prerequisite("mage.fireball", 1);
        assert_eq!(
            template.validate(),
            Err(TemplateError::SelfPrerequisite(template.id.clone()))
        );
    }

    #[test]
    fn passive_bonus_requires_rank() {
        let template = SkillTemplate::new("warrior.toughness", "Toughness", SkillKind::Passive)
            .with_passive(StatKind::MaxLife, vec![20.0]);

        assert_eq!(template.passive_bonus(0), None);
        assert_eq!(template.passive_bonus(1), Some((StatKind::MaxLife, 20.0)));
    }
}
