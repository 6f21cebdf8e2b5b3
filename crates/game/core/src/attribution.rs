//! Damage attribution.
//!
//! Every live hostile entity carries a map of which characters damaged it,
//! how much, and when. On death the map decides who earns experience; on
//! despawn it is discarded. Maps are ephemeral and never persisted.

use std::collections::BTreeMap;

use crate::config::AttributionConfig;
use crate::types::{CharacterId, EntityId, Tick};

/// Origin of a damage event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    Character(CharacterId),
    Minion { owner: CharacterId },
    Sentry { owner: CharacterId },
    /// Projectiles whose owner is unknown are not attributed.
    Projectile { owner: Option<CharacterId> },
    /// Traps, lava, other hostiles.
    Environment,
}

impl DamageSource {
    /// Character credited for this damage.
    pub fn owner(&self) -> Option<CharacterId> {
        match *self {
            Self::Character(id) | Self::Minion { owner: id } | Self::Sentry { owner: id } => {
                Some(id)
            }
            Self::Projectile { owner } => owner,
            Self::Environment => None,
        }
    }
}

/// Cumulative damage of one contributor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub damage: u64,
    pub last_hit: Tick,
}

/// Eligibility window parameters, with the timeout already in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributionWindow {
    pub timeout_ticks: u64,
    pub minimum_damage: u64,
}

impl AttributionWindow {
    pub fn new(config: &AttributionConfig, timeout_ticks: u64) -> Self {
        Self {
            timeout_ticks,
            minimum_damage: config.minimum_damage,
        }
    }

    fn within(&self, now: Tick, at: Tick) -> bool {
        now.since(at) <= self.timeout_ticks
    }
}

/// Attribution record of one hostile entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageAttributionMap {
    contributions: BTreeMap<CharacterId, Contribution>,
    /// Tick of the most recent hit. Interactions never move it.
    last_damage: Tick,
    last_interaction: Option<(CharacterId, Tick)>,
}

impl DamageAttributionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit at `now`. Returns the credited character, if any.
    ///
    /// Damage that went idle past the timeout before this hit is cleared
    /// first, so an old fight never mixes with a new one.
    pub fn record(
        &mut self,
        source: DamageSource,
        damage: u32,
        now: Tick,
        window: &AttributionWindow,
    ) -> Option<CharacterId> {
        let owner = source.owner()?;
        if self.damage_expired(now, window) {
            self.contributions.clear();
        }

        let entry = self.contributions.entry(owner).or_insert(Contribution {
            damage: 0,
            last_hit: now,
        });
        entry.damage = entry.damage.saturating_add(damage as u64);
        entry.last_hit = now;
        self.last_damage = now;
        Some(owner)
    }

    /// Marks `character` as the last one to interact with the entity.
    ///
    /// Only damage counts as fight activity: an interaction keeps itself
    /// eligible for the fallback but does not extend recorded damage.
    pub fn record_interaction(&mut self, character: CharacterId, now: Tick) {
        self.last_interaction = Some((character, now));
    }

    /// Recorded damage that went idle past the timeout.
    fn damage_expired(&self, now: Tick, window: &AttributionWindow) -> bool {
        !self.contributions.is_empty() && !window.within(now, self.last_damage)
    }

    /// Both damage and the last interaction are past the timeout. Empty maps
    /// are never stale.
    pub fn is_stale(&self, now: Tick, window: &AttributionWindow) -> bool {
        let damage_idle = self.contributions.is_empty() || self.damage_expired(now, window);
        let interaction_idle = match self.last_interaction {
            Some((_, at)) => !window.within(now, at),
            None => true,
        };
        !self.is_empty() && damage_idle && interaction_idle
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty() && self.last_interaction.is_none()
    }

    pub fn clear(&mut self) {
        self.contributions.clear();
        self.last_interaction = None;
    }

    pub fn contribution(&self, character: CharacterId) -> Option<&Contribution> {
        self.contributions.get(&character)
    }

    pub fn contributors(&self) -> impl Iterator<Item = (CharacterId, &Contribution)> {
        self.contributions.iter().map(|(id, contribution)| (*id, contribution))
    }

    pub fn total_damage(&self) -> u64 {
        self.contributions.values().map(|c| c.damage).sum()
    }

    pub fn last_interaction(&self) -> Option<CharacterId> {
        self.last_interaction.map(|(character, _)| character)
    }

    /// Characters eligible for a kill reward at `now`, ordered by id.
    ///
    /// Contributors qualify with cumulative damage at or above the minimum
    /// and a last hit inside the window. When none qualifies, a last
    /// interaction inside the window makes that character eligible.
    pub fn eligible(&self, now: Tick, window: &AttributionWindow) -> Vec<CharacterId> {
        if !self.damage_expired(now, window) {
            let eligible: Vec<CharacterId> = self
                .contributions
                .iter()
                .filter(|(_, c)| {
                    c.damage >= window.minimum_damage && window.within(now, c.last_hit)
                })
                .map(|(id, _)| *id)
                .collect();
            if !eligible.is_empty() {
                return eligible;
            }
        }

        match self.last_interaction {
            Some((character, at)) if window.within(now, at) => vec![character],
            _ => Vec::new(),
        }
    }
}

/// Attribution maps of every live hostile entity.
#[derive(Clone, Debug, Default)]
pub struct AttributionLedger {
    maps: BTreeMap<EntityId, DamageAttributionMap>,
}

impl AttributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records damage against `entity`. Environmental damage leaves no trace.
    pub fn record(
        &mut self,
        entity: EntityId,
        source: DamageSource,
        damage: u32,
        now: Tick,
        window: &AttributionWindow,
    ) -> Option<CharacterId> {
        source.owner()?;
        self.maps
            .entry(entity)
            .or_default()
            .record(source, damage, now, window)
    }

    pub fn record_interaction(&mut self, entity: EntityId, character: CharacterId, now: Tick) {
        self.maps
            .entry(entity)
            .or_default()
            .record_interaction(character, now);
    }

    pub fn get(&self, entity: EntityId) -> Option<&DamageAttributionMap> {
        self.maps.get(&entity)
    }

    /// Removes and returns the map of a dead entity. A second call for the
    /// same entity returns `None`, so a kill is only ever rewarded once.
    pub fn consume(&mut self, entity: EntityId) -> Option<DamageAttributionMap> {
        self.maps.remove(&entity)
    }

    /// Discards the map of an entity that left without dying.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        self.maps.remove(&entity).is_some()
    }

    /// Drops every stale map. Returns how many were removed.
    pub fn prune(&mut self, now: Tick, window: &AttributionWindow) -> usize {
        let before = self.maps.len();
        self.maps
            .retain(|_, map| !map.is_empty() && !map.is_stale(now, window));
        before - self.maps.len()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
