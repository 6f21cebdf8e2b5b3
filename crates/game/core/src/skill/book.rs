//! The learned-skill set of one character.

use std::collections::BTreeMap;

use crate::character::PassiveBonuses;
use crate::config::ProgressionConfig;
use crate::env::SkillOracle;
use crate::types::SkillId;

use super::error::HotbarError;
use super::instance::SkillInstance;
use super::template::{Prerequisite, SkillTemplate};

pub type Hotbar = [Option<SkillId>; ProgressionConfig::HOTBAR_SLOTS];

/// Skill instances keyed by id, plus hotbar bindings.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBook {
    instances: BTreeMap<SkillId, SkillInstance>,
    hotbar: Hotbar,
}

impl SkillBook {
    /// One rank-0 instance per template in the catalog.
    pub fn new(catalog: &(impl SkillOracle + ?Sized)) -> Self {
        let mut book = Self::default();
        book.sync_with(catalog);
        book
    }

    /// Adds rank-0 instances for templates the book does not know yet.
    ///
    /// Instances whose template disappeared are kept so their rank survives
    /// a content reinstall.
    pub fn sync_with(&mut self, catalog: &(impl SkillOracle + ?Sized)) -> usize {
        let mut added = 0;
        for template in catalog.templates() {
            if !self.instances.contains_key(&template.id) {
                self.instances
                    .insert(template.id.clone(), SkillInstance::new(template.id.clone()));
                added += 1;
            }
        }
        added
    }

    /// Inserts a restored instance, replacing any existing one.
    pub fn restore(&mut self, instance: SkillInstance) {
        self.instances.insert(instance.skill.clone(), instance);
    }

    pub fn instance(&self, skill: &SkillId) -> Option<&SkillInstance> {
        self.instances.get(skill)
    }

    pub fn instance_mut(&mut self, skill: &SkillId) -> Option<&mut SkillInstance> {
        self.instances.get_mut(skill)
    }

    /// Instance for `skill`, created at rank 0 if missing.
    pub fn entry(&mut self, skill: &SkillId) -> &mut SkillInstance {
        self.instances
            .entry(skill.clone())
            .or_insert_with(|| SkillInstance::new(skill.clone()))
    }

    pub fn instances(&self) -> impl Iterator<Item = &SkillInstance> {
        self.instances.values()
    }

    /// Current rank, 0 for unknown skills.
    pub fn rank(&self, skill: &SkillId) -> u32 {
        self.instances.get(skill).map_or(0, SkillInstance::rank)
    }

    pub fn learned(&self) -> impl Iterator<Item = &SkillInstance> {
        self.instances.values().filter(|instance| instance.is_learned())
    }

    /// First prerequisite of `template` that is not met, by direct lookup.
    pub fn check_prerequisites<'t>(&self, template: &'t SkillTemplate) -> Option<&'t Prerequisite> {
        template
            .prerequisites
            .iter()
            .find(|prerequisite| self.rank(&prerequisite.skill) < prerequisite.min_rank)
    }

    pub fn prerequisites_met(&self, template: &SkillTemplate) -> bool {
        self.check_prerequisites(template).is_none()
    }

    /// Advances every cooldown by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        for instance in self.instances.values_mut() {
            instance.tick(delta);
        }
    }

    /// Every rank back to 0 and the hotbar cleared. Returns the number of
    /// ranks removed; the caller refunds the spent points.
    pub fn reset_all(&mut self) -> u32 {
        self.clear_hotbar();
        self.instances.values_mut().map(SkillInstance::reset).sum()
    }

    /// Sum of passive contributions at current ranks.
    pub fn passive_bonuses(&self, catalog: &(impl SkillOracle + ?Sized)) -> PassiveBonuses {
        let mut bonuses = PassiveBonuses::new();
        for instance in self.learned() {
            let Some(template) = catalog.template(&instance.skill) else {
                continue;
            };
            if let Some((stat, value)) = template.passive_bonus(instance.rank()) {
                bonuses.add(stat, value);
            }
        }
        bonuses
    }

    // ===== hotbar =====

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn hotbar_slot(&self, slot: usize) -> Result<Option<&SkillId>, HotbarError> {
        Self::check_slot(slot)?;
        Ok(self.hotbar[slot].as_ref())
    }

    /// Binds a learned skill to `slot`, moving it if it was bound elsewhere.
    pub fn assign_hotbar(&mut self, slot: usize, skill: &SkillId) -> Result<(), HotbarError> {
        Self::check_slot(slot)?;
        if self.rank(skill) == 0 {
            return Err(HotbarError::NotLearned(skill.clone()));
        }

        for bound in self.hotbar.iter_mut() {
            if bound.as_ref() == Some(skill) {
                *bound = None;
            }
        }
        self.hotbar[slot] = Some(skill.clone());
        Ok(())
    }

    pub fn clear_hotbar_slot(&mut self, slot: usize) -> Result<Option<SkillId>, HotbarError> {
        Self::check_slot(slot)?;
        Ok(self.hotbar[slot].take())
    }

    pub fn clear_hotbar(&mut self) {
        self.hotbar = Default::default();
    }

    fn check_slot(slot: usize) -> Result<(), HotbarError> {
        if slot < ProgressionConfig::HOTBAR_SLOTS {
            Ok(())
        } else {
            Err(HotbarError::InvalidSlot {
                slot,
                slots: ProgressionConfig::HOTBAR_SLOTS,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::StatKind;
    use crate::env::StaticSkillTable;
    use crate::skill::SkillKind;

    fn catalog() -> StaticSkillTable {
        StaticSkillTable::new([
            SkillTemplate::new("slash", "Slash", SkillKind::Active),
            SkillTemplate::new("whirlwind", "Whirlwind", SkillKind::Active)
                .with_prerequisite("slash", 1),
            SkillTemplate::new("toughness", "Toughness", SkillKind::Passive)
                .with_passive(StatKind::MaxLife, vec![25.0]),
        ])
    }

    #[test]
    fn new_book_has_rank_zero_instances() {
        let book = SkillBook::new(&catalog());
        assert_eq!(book.instances().count(), 3);
        assert_eq!(book.learned().count(), 0);
    }

    #[test]
    fn prerequisites_are_direct_lookups() {
        let catalog = catalog();
        let mut book = SkillBook::new(&catalog);
        let whirlwind = catalog.template(&"whirlwind".into()).unwrap();

        assert_eq!(
            book.check_prerequisites(whirlwind).map(|p| p.skill.as_str()),
            Some("slash")
        );

        book.entry(&"slash".into()).rank_up();
        assert!(book.prerequisites_met(whirlwind));
    }

    #[test]
    fn hotbar_accepts_only_learned_skills_in_range() {
        let mut book = SkillBook::new(&catalog());
        let slash = SkillId::from("slash");

        assert_eq!(
            book.assign_hotbar(0, &slash),
            Err(HotbarError::NotLearned(slash.clone()))
        );

        book.entry(&slash).rank_up();
        assert_eq!(
            book.assign_hotbar(ProgressionConfig::HOTBAR_SLOTS, &slash),
            Err(HotbarError::InvalidSlot {
                slot: ProgressionConfig::HOTBAR_SLOTS,
                slots: ProgressionConfig::HOTBAR_SLOTS
            })
        );

        book.assign_hotbar(0, &slash).unwrap();
        book.assign_hotbar(3, &slash).unwrap();
        assert_eq!(book.hotbar_slot(0), Ok(None));
        assert_eq!(book.hotbar_slot(3), Ok(Some(&slash)));
    }

    #[test]
    fn reset_clears_ranks_and_hotbar() {
        let mut book = SkillBook::new(&catalog());
        let slash = SkillId::from("slash");
        book.entry(&slash).rank_up();
        book.entry(&"toughness".into()).rank_up();
        book.assign_hotbar(1, &slash).unwrap();

        assert_eq!(book.reset_all(), 2);
        assert_eq!(book.learned().count(), 0);
        assert!(book.hotbar().iter().all(Option::is_none));
    }

    #[test]
    fn passive_bonuses_follow_ranks() {
        let catalog = catalog();
        let mut book = SkillBook::new(&catalog);
        assert!(book.passive_bonuses(&catalog).is_empty());

        book.entry(&"toughness".into()).rank_up();
        let bonuses = book.passive_bonuses(&catalog);
        assert_eq!(bonuses.get(StatKind::MaxLife), 25.0);

        // recomputing does not accumulate
        assert_eq!(book.passive_bonuses(&catalog), bonuses);
    }
}
