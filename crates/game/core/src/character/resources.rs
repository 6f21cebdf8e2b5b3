//! Resource pools spent by skill activation.
//!
//! Maximums are derived from stats and recomputed on every refresh; current
//! values are game state and are clamped whenever the maximums move.

use super::stats::DerivedStats;

/// Resource a skill consumes. `None` is always satisfied.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    None,
    Mana,
    Life,
    Stamina,
    Rage,
    Energy,
}

/// Current and maximum value of one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    pub current: u32,
    pub maximum: u32,
}

impl Pool {
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }
}

/// Every resource pool of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    life: Pool,
    mana: Pool,
    stamina: Pool,
    rage: Pool,
    energy: Pool,
}

impl ResourcePool {
    pub const RAGE_MAX: u32 = 100;
    pub const ENERGY_MAX: u32 = 100;

    /// Full pools for the given stats. Rage starts empty.
    pub fn new(derived: &DerivedStats) -> Self {
        Self {
            life: Pool::full(derived.max_life),
            mana: Pool::full(derived.max_mana),
            stamina: Pool::full(derived.max_stamina),
            rage: Pool {
                current: 0,
                maximum: Self::RAGE_MAX,
            },
            energy: Pool::full(Self::ENERGY_MAX),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&Pool> {
        match kind {
            ResourceKind::None => None,
            ResourceKind::Mana => Some(&self.mana),
            ResourceKind::Life => Some(&self.life),
            ResourceKind::Stamina => Some(&self.stamina),
            ResourceKind::Rage => Some(&self.rage),
            ResourceKind::Energy => Some(&self.energy),
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut Pool> {
        match kind {
            ResourceKind::None => None,
            ResourceKind::Mana => Some(&mut self.mana),
            ResourceKind::Life => Some(&mut self.life),
            ResourceKind::Stamina => Some(&mut self.stamina),
            ResourceKind::Rage => Some(&mut self.rage),
            ResourceKind::Energy => Some(&mut self.energy),
        }
    }

    /// Current amount, `u32::MAX` for `ResourceKind::None`.
    pub fn current(&self, kind: ResourceKind) -> u32 {
        self.get(kind).map_or(u32::MAX, |pool| pool.current)
    }

    pub fn has(&self, kind: ResourceKind, amount: u32) -> bool {
        self.current(kind) >= amount
    }

    /// Deducts `amount` if available. Leaves the pool untouched otherwise.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> bool {
        let Some(pool) = self.get_mut(kind) else {
            return true;
        };
        if pool.current < amount {
            return false;
        }
        pool.current -= amount;
        true
    }

    /// Adds up to `amount`, capped at the maximum. Returns the amount restored.
    pub fn restore(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let Some(pool) = self.get_mut(kind) else {
            return 0;
        };
        let restored = amount.min(pool.maximum - pool.current);
        pool.current += restored;
        restored
    }

    /// Applies new stat-derived maximums, clamping current values.
    pub fn set_maximums(&mut self, derived: &DerivedStats) {
        self.life.set_maximum(derived.max_life);
        self.mana.set_maximum(derived.max_mana);
        self.stamina.set_maximum(derived.max_stamina);
    }

    /// Refills every pool except rage.
    pub fn refill(&mut self) {
        self.life.current = self.life.maximum;
        self.mana.current = self.mana.maximum;
        self.stamina.current = self.stamina.maximum;
        self.energy.current = self.energy.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ResourcePool {
        let derived = DerivedStats {
            max_life: 100,
            max_mana: 40,
            max_stamina: 60,
            ..DerivedStats::default()
        };
        ResourcePool::new(&derived)
    }

    #[test]
    fn none_is_always_satisfied() {
        let mut resources = pool();
        assert!(resources.has(ResourceKind::None, u32::MAX));
        assert!(resources.spend(ResourceKind::None, 1_000));
    }

    #[test]
    fn failed_spend_does_not_mutate() {
        let mut resources = pool();
        assert!(!resources.spend(ResourceKind::Mana, 41));
        assert_eq!(resources.current(ResourceKind::Mana), 40);

        assert!(resources.spend(ResourceKind::Mana, 15));
        assert_eq!(resources.current(ResourceKind::Mana), 25);
    }

    #[test]
    fn rage_starts_empty_and_restores_to_cap() {
        let mut resources = pool();
        assert_eq!(resources.current(ResourceKind::Rage), 0);
        assert_eq!(resources.restore(ResourceKind::Rage, 250), ResourcePool::RAGE_MAX);
    }

    #[test]
    fn shrinking_maximum_clamps_current() {
        let mut resources = pool();
        let smaller = DerivedStats {
            max_life: 30,
            max_mana: 40,
            max_stamina: 60,
            ..DerivedStats::default()
        };
        resources.set_maximums(&smaller);
        assert_eq!(resources.current(ResourceKind::Life), 30);
    }
}
