//! Attributes, passive bonuses and derived combat stats.
//!
//! Base attributes are the only stored stats. Passive bonuses are rebuilt
//! from skill ranks on every refresh and derived stats are recomputed from
//! both; neither is ever accumulated.
//!
//! - MaxLife = 100 + VIT × 10 + Level × 5
//! - MaxMana = 20 + INT × 5 + WIS × 3
//! - MaxStamina = 50 + VIT × 2 + DEX × 3
//! - Class multiplier = 1 + governing attribute × 1% (STR, DEX, INT, WIS)
//! - Crit chance = 4% + DEX × 0.1%
//! - Cooldown reduction = WIS × 0.2%, at most 75%

use std::collections::BTreeMap;

use crate::combat::{ClassTable, DamageClass};

// ============================================================================
// Attributes
// ============================================================================

/// The six base attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    Wisdom,
    Luck,
}

/// Values of the six base attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub vitality: u32,
    pub wisdom: u32,
    pub luck: u32,
}

impl Attributes {
    /// Starting attributes of a fresh character.
    pub const BASE: Self = Self::uniform(5);
    pub const ZERO: Self = Self::uniform(0);

    pub const fn uniform(value: u32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            intelligence: value,
            vitality: value,
            wisdom: value,
            luck: value,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Vitality => self.vitality,
            Attribute::Wisdom => self.wisdom,
            Attribute::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Vitality => &mut self.vitality,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Luck => &mut self.luck,
        }
    }

    pub fn total(&self) -> u32 {
        self.strength
            + self.dexterity
            + self.intelligence
            + self.vitality
            + self.wisdom
            + self.luck
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &Attributes) -> Self {
        Self {
            strength: self.strength.saturating_add(other.strength),
            dexterity: self.dexterity.saturating_add(other.dexterity),
            intelligence: self.intelligence.saturating_add(other.intelligence),
            vitality: self.vitality.saturating_add(other.vitality),
            wisdom: self.wisdom.saturating_add(other.wisdom),
            luck: self.luck.saturating_add(other.luck),
        }
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::BASE
    }
}

// ============================================================================
// Passive Bonuses
// ============================================================================

/// Stat a passive skill can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attribute(Attribute),
    MaxLife,
    MaxMana,
    MaxStamina,
    Defense,
    Luck,
    /// Fraction in `[0, 1)`.
    CooldownReduction,
    /// Added to the class damage multiplier.
    Damage(DamageClass),
    /// Added to the class crit chance.
    CritChance(DamageClass),
    ArmorPenetration(DamageClass),
}

/// Stat deltas contributed by passive skills. Rebuilt, never accumulated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassiveBonuses {
    deltas: BTreeMap<StatKind, f32>,
}

impl PassiveBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stat: StatKind, value: f32) {
        if !value.is_finite() {
            return;
        }
        *self.deltas.entry(stat).or_insert(0.0) += value;
    }

    /// Delta for `stat`, zero when no passive touches it.
    pub fn get(&self, stat: StatKind) -> f32 {
        self.deltas.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f32)> + '_ {
        self.deltas.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Flat delta rounded to whole points, never below zero.
    fn points(&self, stat: StatKind) -> u32 {
        self.get(stat).round().max(0.0) as u32
    }
}

// ============================================================================
// Derived Stats
// ============================================================================

/// Combat stats computed from attributes, level and passive bonuses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedStats {
    pub max_life: u32,
    pub max_mana: u32,
    pub max_stamina: u32,
    pub defense: u32,
    pub luck: u32,
    pub cooldown_reduction: f32,
    pub classes: ClassTable,
}

impl DerivedStats {
    pub const MAX_COOLDOWN_REDUCTION: f32 = 0.75;
    const BASE_CRIT_CHANCE: f32 = 0.04;

    pub fn compute(base: &Attributes, level: u32, passives: &PassiveBonuses) -> Self {
        let attrs = Self::effective_attributes(base, passives);
        let level = level.max(1);

        let mut classes = ClassTable::default();
        for (class, governing) in [
            (DamageClass::Melee, attrs.strength),
            (DamageClass::Ranged, attrs.dexterity),
            (DamageClass::Magic, attrs.intelligence),
            (DamageClass::Summon, attrs.wisdom),
        ] {
            let stats = classes.get_mut(class);
            stats.damage_multiplier =
                (1.0 + governing as f32 * 0.01 + passives.get(StatKind::Damage(class))).max(0.0);
            stats.crit_chance = (Self::BASE_CRIT_CHANCE
                + attrs.dexterity as f32 * 0.001
                + passives.get(StatKind::CritChance(class)))
            .clamp(0.0, 1.0);
            stats.armor_penetration = passives.points(StatKind::ArmorPenetration(class));
        }

        let cooldown_reduction = (attrs.wisdom as f32 * 0.002
            + passives.get(StatKind::CooldownReduction))
        .clamp(0.0, Self::MAX_COOLDOWN_REDUCTION);

        Self {
            max_life: 100 + attrs.vitality * 10 + level * 5 + passives.points(StatKind::MaxLife),
            max_mana: 20
                + attrs.intelligence * 5
                + attrs.wisdom * 3
                + passives.points(StatKind::MaxMana),
            max_stamina: 50
                + attrs.vitality * 2
                + attrs.dexterity * 3
                + passives.points(StatKind::MaxStamina),
            defense: attrs.vitality / 2 + passives.points(StatKind::Defense),
            luck: attrs.luck + passives.points(StatKind::Luck),
            cooldown_reduction,
            classes,
        }
    }

    fn effective_attributes(base: &Attributes, passives: &PassiveBonuses) -> Attributes {
        let mut bonus = Attributes::ZERO;
        for (stat, _) in passives.iter() {
            if let StatKind::Attribute(attribute) = stat {
                *bonus.get_mut(attribute) = passives.points(stat);
            }
        }
        base.plus(&bonus)
    }
}
