//! Player characters: progression, skills, resources and derived stats.
//!
//! [`Character`] is the runtime aggregate. Only [`CharacterSave`] is
//! persisted; passive bonuses, derived stats and resource maximums are
//! rebuilt from it by [`Character::refresh`].

mod progression;
mod resources;
mod stats;

pub use progression::{CharacterProgression, LevelUpReport, PointError, PointPool};
pub use resources::{Pool, ResourceKind, ResourcePool};
pub use stats::{Attribute, Attributes, DerivedStats, PassiveBonuses, StatKind};

use crate::config::LevelingConfig;
use crate::env::{EffectRegistry, SkillOracle};
use crate::skill::{
    Activation, CannotLearnReason, CannotUseReason, Hotbar, Learner, SkillBehaviors, SkillBook,
    SkillInstance, SkillTemplate,
};
use crate::types::{CharacterId, SkillId};

/// Persisted part of a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSave {
    pub id: CharacterId,
    pub progression: CharacterProgression,
    /// Learned skills only; unlearned instances are recreated from content.
    pub ranks: Vec<(SkillId, u32)>,
    pub hotbar: Hotbar,
}

/// One player character.
#[derive(Clone, Debug)]
pub struct Character {
    pub id: CharacterId,
    pub progression: CharacterProgression,
    pub skills: SkillBook,
    pub resources: ResourcePool,
    passives: PassiveBonuses,
    derived: DerivedStats,
}

impl Character {
    pub fn new(
        id: CharacterId,
        catalog: &(impl SkillOracle + ?Sized),
        config: &LevelingConfig,
    ) -> Self {
        let progression = CharacterProgression::new(config);
        let passives = PassiveBonuses::new();
        let derived = DerivedStats::compute(progression.attributes(), 1, &passives);
        Self {
            id,
            resources: ResourcePool::new(&derived),
            skills: SkillBook::new(catalog),
            progression,
            passives,
            derived,
        }
    }

    /// Rebuilds a character from its save and refreshes derived state.
    pub fn from_save(save: CharacterSave, catalog: &(impl SkillOracle + ?Sized)) -> Self {
        let mut skills = SkillBook::new(catalog);
        for (skill, rank) in save.ranks {
            skills.restore(SkillInstance::with_rank(skill, rank));
        }
        for (slot, skill) in save.hotbar.iter().enumerate() {
            if let Some(skill) = skill {
                // bindings to skills that are no longer learned are dropped
                let _ = skills.assign_hotbar(slot, skill);
            }
        }

        let passives = skills.passive_bonuses(catalog);
        let derived = DerivedStats::compute(
            save.progression.attributes(),
            save.progression.level(),
            &passives,
        );
        Self {
            id: save.id,
            resources: ResourcePool::new(&derived),
            progression: save.progression,
            skills,
            passives,
            derived,
        }
    }

    pub fn to_save(&self) -> CharacterSave {
        CharacterSave {
            id: self.id,
            progression: self.progression.clone(),
            ranks: self
                .skills
                .learned()
                .map(|instance| (instance.skill.clone(), instance.rank()))
                .collect(),
            hotbar: self.skills.hotbar().clone(),
        }
    }

    pub fn passives(&self) -> &PassiveBonuses {
        &self.passives
    }

    pub fn derived(&self) -> &DerivedStats {
        &self.derived
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    /// Recomputes passive bonuses from ranks, then derived stats and resource
    /// maximums. Idempotent: bonuses are assigned, never added.
    pub fn refresh(&mut self, catalog: &(impl SkillOracle + ?Sized)) {
        self.passives = self.skills.passive_bonuses(catalog);
        self.derived = DerivedStats::compute(
            self.progression.attributes(),
            self.progression.level(),
            &self.passives,
        );
        self.resources.set_maximums(&self.derived);
    }

    /// Advances cooldowns by `delta` seconds and reapplies passives.
    pub fn tick(&mut self, delta: f32, catalog: &(impl SkillOracle + ?Sized)) {
        self.skills.tick(delta);
        self.refresh(catalog);
    }

    fn learner(&self) -> Learner<'_> {
        Learner {
            level: self.progression.level(),
            job: self.progression.job(),
            skill_points: self.progression.skill_points().available,
            book: &self.skills,
        }
    }

    pub fn cannot_learn_reason(&self, template: &SkillTemplate) -> Option<CannotLearnReason> {
        let learner = self.learner();
        match self.skills.instance(&template.id) {
            Some(instance) => instance.cannot_learn_reason(template, &learner),
            None => SkillInstance::new(template.id.clone()).cannot_learn_reason(template, &learner),
        }
    }

    pub fn can_learn(&self, template: &SkillTemplate) -> bool {
        self.cannot_learn_reason(template).is_none()
    }

    /// Learns one rank of `template`, deducting its point cost.
    ///
    /// Returns the new rank. Passive bonuses apply on the next refresh.
    pub fn learn_skill(&mut self, template: &SkillTemplate) -> Result<u32, CannotLearnReason> {
        if let Some(reason) = self.cannot_learn_reason(template) {
            return Err(reason);
        }
        if !self.progression.spend_skill_points(template.point_cost) {
            return Err(CannotLearnReason::NotEnoughPoints {
                required: template.point_cost,
                available: self.progression.skill_points().available,
            });
        }
        Ok(self.skills.entry(&template.id).rank_up())
    }

    pub fn cannot_use_reason(&self, template: &SkillTemplate) -> Option<CannotUseReason> {
        match self.skills.instance(&template.id) {
            Some(instance) => instance.cannot_use_reason(template, &self.resources),
            None => Some(CannotUseReason::NotLearned),
        }
    }

    pub fn can_use(&self, template: &SkillTemplate) -> bool {
        self.cannot_use_reason(template).is_none()
    }

    /// Activates `template`: spends the resource, starts the cooldown, runs
    /// the skill's behavior and plays its effect on this character.
    pub fn activate_skill(
        &mut self,
        template: &SkillTemplate,
        behaviors: &SkillBehaviors,
        effects: &(impl EffectRegistry + ?Sized),
    ) -> Result<Activation, CannotUseReason> {
        let cooldown_reduction = self.derived.cooldown_reduction;
        let Some(instance) = self.skills.instance_mut(&template.id) else {
            return Err(CannotUseReason::NotLearned);
        };
        let activation = instance.activate(template, &mut self.resources, cooldown_reduction)?;

        behaviors.dispatch(self, &activation);
        if let Some(effect) = &activation.effect {
            let intensity = activation.rank as f32 / template.max_rank.max(1) as f32;
            effects.play_effect_on_character(effect, self.id, intensity);
        }
        Ok(activation)
    }

    /// Adds XP under `level_cap`. Leveling changes derived stats on the next
    /// refresh.
    pub fn gain_experience(
        &mut self,
        amount: u64,
        level_cap: u32,
        config: &LevelingConfig,
    ) -> LevelUpReport {
        self.progression.gain_experience(amount, level_cap, config)
    }

    /// Debug level change. Lowering the level also resets every skill rank,
    /// since the refunded points paid for them.
    pub fn set_level(&mut self, level: u32, level_cap: u32, config: &LevelingConfig) -> u32 {
        let target = level.clamp(1, level_cap.max(1));
        if target < self.progression.level() {
            self.skills.reset_all();
        }
        self.progression.set_level(target, level_cap, config)
    }

    /// Every rank back to 0 with all skill points refunded.
    pub fn reset_skills(&mut self) -> u32 {
        self.skills.reset_all();
        self.progression.refund_skill_points()
    }

    /// Back to a fresh level-1 character, keeping bonus point grants.
    pub fn reset(&mut self, config: &LevelingConfig) {
        self.skills.reset_all();
        self.progression.reset(config);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::combat::DamageClass;
    use crate::env::StaticSkillTable;
    use crate::job::Job;
    use crate::skill::{RankTables, SkillKind};
    use crate::types::{EffectId, Position};

    fn catalog() -> StaticSkillTable {
        StaticSkillTable::new([
            SkillTemplate::new("heal", "Heal", SkillKind::Active)
                .with_ranks(RankTables {
                    damage: vec![1.0],
                    duration: vec![0.0],
                    resource_cost: vec![20],
                    cooldown: vec![10.0],
                })
                .with_resource(ResourceKind::Mana)
                .with_effect("holy_light"),
            SkillTemplate::new("iron_skin", "Iron Skin", SkillKind::Passive)
                .with_ranks(RankTables {
                    damage: vec![0.0, 0.0],
                    duration: vec![0.0, 0.0],
                    resource_cost: vec![0, 0],
                    cooldown: vec![0.0, 0.0],
                })
                .with_passive(StatKind::MaxLife, vec![10.0, 25.0]),
            SkillTemplate::new("meteor", "Meteor", SkillKind::Active)
                .with_requirements(Some(Job::Mage), 10, 1)
                .with_damage(DamageClass::Magic, 120),
        ])
    }

    fn character(catalog: &StaticSkillTable) -> Character {
        Character::new(CharacterId(1), catalog, &LevelingConfig::default())
    }

    #[derive(Default)]
    struct RecordingEffects {
        played: Mutex<Vec<(EffectId, CharacterId)>>,
    }

    impl EffectRegistry for RecordingEffects {
        fn play_effect(&self, _effect: &EffectId, _position: Position, _intensity: f32) {}

        fn play_effect_on_character(&self, effect: &EffectId, character: CharacterId, _: f32) {
            self.played
                .lock()
                .unwrap()
                .push((effect.clone(), character));
        }
    }

    #[test]
    fn learning_spends_points_and_raises_rank() {
        let catalog = catalog();
        let mut hero = character(&catalog);
        let heal = catalog.template(&"heal".into()).unwrap();

        assert_eq!(
            hero.learn_skill(heal),
            Err(CannotLearnReason::NotEnoughPoints {
                required: 1,
                available: 0
            })
        );

        hero.progression.add_skill_points(1);
        assert_eq!(hero.learn_skill(heal), Ok(1));
        assert_eq!(hero.progression.skill_points().available, 0);
        assert_eq!(hero.skills.rank(&heal.id), 1);
    }

    #[test]
    fn passives_are_reassigned_not_accumulated() {
        let catalog = catalog();
        let mut hero = character(&catalog);
        let iron_skin = catalog.template(&"iron_skin".into()).unwrap();
        let base_life = hero.derived().max_life;

        hero.progression.add_skill_points(2);
        hero.learn_skill(iron_skin).unwrap();
        hero.learn_skill(iron_skin).unwrap();
        for _ in 0..5 {
            hero.tick(0.016, &catalog);
        }

        assert_eq!(hero.derived().max_life, base_life + 25);
    }

    #[test]
    fn activation_runs_behavior_and_plays_effect() {
        let catalog = catalog();
        let mut hero = character(&catalog);
        let heal = catalog.template(&"heal".into()).unwrap();
        hero.progression.add_skill_points(1);
        hero.learn_skill(heal).unwrap();
        hero.resources.spend(ResourceKind::Life, 50);

        let mut behaviors = SkillBehaviors::new();
        behaviors.register("heal", |character: &mut Character, _: &Activation| {
            character.resources.restore(ResourceKind::Life, 30);
        });
        let effects = RecordingEffects::default();
        let life_before = hero.resources.current(ResourceKind::Life);
        let mana_before = hero.resources.current(ResourceKind::Mana);

        let activation = hero.activate_skill(heal, &behaviors, &effects).unwrap();

        assert_eq!(activation.resource_spent, 20);
        assert_eq!(hero.resources.current(ResourceKind::Mana), mana_before - 20);
        assert_eq!(hero.resources.current(ResourceKind::Life), life_before + 30);
        assert_eq!(
            *effects.played.lock().unwrap(),
            vec![(EffectId::from("holy_light"), CharacterId(1))]
        );
        assert!(matches!(
            hero.cannot_use_reason(heal),
            Some(CannotUseReason::OnCooldown { .. })
        ));
    }

    #[test]
    fn save_restores_ranks_and_hotbar() {
        let catalog = catalog();
        let mut hero = character(&catalog);
        let heal = catalog.template(&"heal".into()).unwrap();
        hero.progression.add_skill_points(1);
        hero.learn_skill(heal).unwrap();
        hero.skills.assign_hotbar(2, &heal.id).unwrap();

        let restored = Character::from_save(hero.to_save(), &catalog);

        assert_eq!(restored.skills.rank(&heal.id), 1);
        assert_eq!(restored.skills.hotbar_slot(2), Ok(Some(&heal.id)));
        assert_eq!(restored.progression, hero.progression);
        assert_eq!(restored.to_save(), hero.to_save());
    }

    #[test]
    fn lowering_level_resets_skills() {
        let catalog = catalog();
        let config = LevelingConfig::default();
        let mut hero = character(&catalog);
        let heal = catalog.template(&"heal".into()).unwrap();
        hero.set_level(5, 20, &config);
        hero.learn_skill(heal).unwrap();

        hero.set_level(2, 20, &config);

        assert_eq!(hero.skills.rank(&heal.id), 0);
        assert_eq!(hero.progression.skill_points().available, 1);
    }

    #[test]
    fn reset_skills_refunds_and_clears_hotbar() {
        let catalog = catalog();
        let mut hero = character(&catalog);
        let heal = catalog.template(&"heal".into()).unwrap();
        let iron_skin = catalog.template(&"iron_skin".into()).unwrap();
        hero.progression.add_skill_points(3);
        hero.learn_skill(heal).unwrap();
        hero.learn_skill(iron_skin).unwrap();
        hero.learn_skill(iron_skin).unwrap();
        hero.skills.assign_hotbar(0, &heal.id).unwrap();

        assert_eq!(hero.reset_skills(), 3);

        assert_eq!(hero.skills.rank(&heal.id), 0);
        assert_eq!(hero.skills.rank(&iron_skin.id), 0);
        assert_eq!(hero.skills.hotbar_slot(0), Ok(None));
        assert_eq!(hero.progression.skill_points().available, 3);
        assert_eq!(hero.progression.skill_points().spent, 0);
        assert_eq!(hero.reset_skills(), 0);
    }

    #[test]
    fn unknown_skill_reports_not_learned() {
        let catalog = catalog();
        let hero = character(&catalog);
        let stray = SkillTemplate::new("stray", "Stray", SkillKind::Active);
        assert_eq!(hero.cannot_use_reason(&stray), Some(CannotUseReason::NotLearned));
    }
}
