//! World progression state.
//!
//! World level only grows: it is derived from a one-way ledger of counted
//! boss kills, so replaying the ledger always reproduces the same value. The
//! level cap tier and hardmode flag are derived from the same ledger.
//!
//! Each ledger entry keeps what the boss contributed when it was counted.
//! Removing or rebalancing boss content later can raise a contribution but
//! never lower it.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ProgressionConfig;
use crate::entity::EntityDescriptor;
use crate::env::{BossOracle, BossProgression};
use crate::error::{ErrorSeverity, GameError};
use crate::types::BossId;

// ============================================================================
// Level Cap Tier
// ============================================================================

/// Progression tier, derived from world level and the hardmode flag.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LevelCapTier {
    #[default]
    PreHardmode,
    EarlyHardmode,
    PostMechs,
    PreMoonlord,
    Unlimited,
}

impl LevelCapTier {
    /// Tier for a world level. Without hardmode the world stays pre-hardmode
    /// whatever its level.
    pub fn from_world_level(world_level: u32, hardmode: bool, config: &ProgressionConfig) -> Self {
        let world = &config.world;
        if !hardmode {
            return Self::PreHardmode;
        }
        if world_level >= world.unlimited_level {
            Self::Unlimited
        } else if world_level >= world.pre_moonlord_level {
            Self::PreMoonlord
        } else if world_level >= world.post_mechs_level {
            Self::PostMechs
        } else {
            Self::EarlyHardmode
        }
    }
}

// ============================================================================
// Temporary World Events
// ============================================================================

/// Temporary world events that boost experience while active.
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
pub enum WorldEvent {
    BloodMoon,
    SolarEclipse,
    GoblinArmy,
    PirateInvasion,
    PumpkinMoon,
    FrostMoon,
    MartianMadness,
}

/// Currently active events. Not persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldEvents {
    active: BTreeSet<WorldEvent>,
}

impl WorldEvents {
    pub fn start(&mut self, event: WorldEvent) -> bool {
        self.active.insert(event)
    }

    pub fn end(&mut self, event: WorldEvent) -> bool {
        self.active.remove(&event)
    }

    pub fn is_active(&self, event: WorldEvent) -> bool {
        self.active.contains(&event)
    }

    pub fn iter(&self) -> impl Iterator<Item = WorldEvent> + '_ {
        self.active.iter().copied()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

// ============================================================================
// World Progression State
// ============================================================================

/// Outcome of reporting a boss kill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossKillOutcome {
    /// First kill of this boss; increments applied.
    Counted {
        previous_world_level: u32,
        world_level: u32,
        level_cap: u32,
        tier: LevelCapTier,
    },
    /// The boss was already in the ledger; nothing changed.
    AlreadyCounted,
    /// The boss is not registered (e.g. its content is not installed).
    Unknown,
}

/// Increments a counted boss applied to the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossContribution {
    pub world_level: u32,
    pub level_cap: u32,
    pub starts_hardmode: bool,
}

impl BossContribution {
    /// Field-wise maximum of two contributions.
    fn merge(self, other: Self) -> Self {
        Self {
            world_level: self.world_level.max(other.world_level),
            level_cap: self.level_cap.max(other.level_cap),
            starts_hardmode: self.starts_hardmode || other.starts_hardmode,
        }
    }
}

impl From<&BossProgression> for BossContribution {
    fn from(boss: &BossProgression) -> Self {
        Self {
            world_level: boss.world_level,
            level_cap: boss.level_cap,
            starts_hardmode: boss.starts_hardmode,
        }
    }
}

/// One per game world. Persisted with the world save.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldProgressionState {
    counted_bosses: BTreeMap<BossId, BossContribution>,
    /// Debug floor set by the world-level command. Never lowers the
    /// boss-derived level.
    debug_floor: u32,

    // derived from the ledger by `recalculate_world_level`
    world_level: u32,
    hardmode: bool,
    tier: LevelCapTier,
    level_cap: u32,
}

impl WorldProgressionState {
    pub fn new(config: &ProgressionConfig) -> Self {
        Self {
            counted_bosses: BTreeMap::new(),
            debug_floor: 0,
            world_level: 0,
            hardmode: false,
            tier: LevelCapTier::PreHardmode,
            level_cap: config.leveling.base_level_cap.min(config.leveling.max_level),
        }
    }

    pub fn world_level(&self) -> u32 {
        self.world_level
    }

    pub fn level_cap(&self) -> u32 {
        self.level_cap
    }

    pub fn tier(&self) -> LevelCapTier {
        self.tier
    }

    pub fn is_hardmode(&self) -> bool {
        self.hardmode
    }

    pub fn is_counted(&self, boss: &BossId) -> bool {
        self.counted_bosses.contains_key(boss)
    }

    pub fn counted_bosses(&self) -> impl Iterator<Item = &BossId> {
        self.counted_bosses.keys()
    }

    /// Recorded contribution of a counted boss.
    pub fn contribution(&self, boss: &BossId) -> Option<BossContribution> {
        self.counted_bosses.get(boss).copied()
    }

    pub fn debug_floor(&self) -> u32 {
        self.debug_floor
    }

    /// Counts a boss kill once. Re-reporting a counted boss or reporting an
    /// unregistered one leaves the state untouched.
    pub fn on_boss_killed(
        &mut self,
        boss: &BossId,
        bosses: &(impl BossOracle + ?Sized),
        config: &ProgressionConfig,
    ) -> BossKillOutcome {
        let Some(entry) = bosses.boss(boss) else {
            return BossKillOutcome::Unknown;
        };
        if self.counted_bosses.contains_key(boss) {
            return BossKillOutcome::AlreadyCounted;
        }
        self.counted_bosses
            .insert(boss.clone(), BossContribution::from(entry));

        let previous_world_level = self.world_level;
        self.recalculate_world_level(bosses, config);

        BossKillOutcome::Counted {
            previous_world_level,
            world_level: self.world_level,
            level_cap: self.level_cap,
            tier: self.tier,
        }
    }

    /// World level used for scaling pre-hardmode content.
    ///
    /// Equals the raw world level before hardmode; capped at the configured
    /// ceiling afterwards.
    pub fn effective_world_level(&self, config: &ProgressionConfig) -> u32 {
        if self.hardmode {
            self.world_level.min(config.world.pre_hardmode_ceiling)
        } else {
            self.world_level
        }
    }

    /// Raw or effective world level depending on the entity's classification.
    pub fn world_level_for(&self, entity: &EntityDescriptor, config: &ProgressionConfig) -> u32 {
        if entity.pre_hardmode {
            self.effective_world_level(config)
        } else {
            self.world_level
        }
    }

    /// Rebuilds every derived field from the boss ledger.
    ///
    /// Each counted boss contributes the larger of its recorded and current
    /// increments, and the merged value is written back to the ledger. Bosses
    /// whose content is missing keep their recorded contribution. Idempotent.
    pub fn recalculate_world_level(
        &mut self,
        bosses: &(impl BossOracle + ?Sized),
        config: &ProgressionConfig,
    ) {
        let mut world_level: u32 = 0;
        let mut cap_bonus: u32 = 0;
        let mut hardmode = false;

        for (id, recorded) in self.counted_bosses.iter_mut() {
            if let Some(current) = bosses.boss(id) {
                *recorded = recorded.merge(BossContribution::from(current));
            }
            world_level = world_level.saturating_add(recorded.world_level);
            cap_bonus = cap_bonus.saturating_add(recorded.level_cap);
            hardmode |= recorded.starts_hardmode;
        }

        self.world_level = world_level.max(self.debug_floor);
        self.hardmode = hardmode;
        self.tier = LevelCapTier::from_world_level(self.world_level, hardmode, config);
        self.level_cap = match self.tier {
            LevelCapTier::Unlimited => config.leveling.max_level,
            _ => config
                .leveling
                .base_level_cap
                .saturating_add(cap_bonus)
                .min(config.leveling.max_level),
        };
    }

    /// Marks every registered boss as counted. Returns how many were new.
    pub fn unlock_all_bosses(
        &mut self,
        bosses: &(impl BossOracle + ?Sized),
        config: &ProgressionConfig,
    ) -> usize {
        let before = self.counted_bosses.len();
        for id in bosses.boss_ids() {
            self.counted_bosses.entry(id).or_default();
        }
        self.recalculate_world_level(bosses, config);
        self.counted_bosses.len() - before
    }

    /// Debug override: raises the world level to at least `level`.
    ///
    /// Rejects values below the current world level, so the world level never
    /// decreases.
    pub fn set_debug_world_level(
        &mut self,
        level: u32,
        bosses: &(impl BossOracle + ?Sized),
        config: &ProgressionConfig,
    ) -> Result<u32, WorldError> {
        if level < self.world_level {
            return Err(WorldError::WouldDecrease {
                requested: level,
                current: self.world_level,
            });
        }

        self.debug_floor = level;
        self.recalculate_world_level(bosses, config);
        Ok(self.world_level)
    }
}

/// Rejected world-state requests.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("world level {requested} is below the current world level {current}")]
    WouldDecrease { requested: u32, current: u32 },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WouldDecrease { .. } => "WORLD_LEVEL_WOULD_DECREASE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BossProgression, StaticBossTable};

    fn boss(id: &str, world_level: u32, level_cap: u32, starts_hardmode: bool) -> BossProgression {
        BossProgression {
            id: BossId::from(id),
            display_name: id.to_owned(),
            level: 10,
            world_level,
            level_cap,
            starts_hardmode,
        }
    }

    fn table() -> StaticBossTable {
        StaticBossTable::new([
            boss("king_slime", 2, 5, false),
            boss("eye_of_cthulhu", 3, 5, false),
            boss("skeleton", 15, 5, false),
            boss("wall_of_flesh", 5, 12, true),
            boss("destroyer", 20, 10, false),
        ])
    }

    #[test]
    fn first_kill_applies_increments_once() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        let wof = BossId::from("wall_of_flesh");

        let outcome = world.on_boss_killed(&wof, &bosses, &config);
        assert_eq!(
            outcome,
            BossKillOutcome::Counted {
                previous_world_level: 0,
                world_level: 5,
                level_cap: 32,
                tier: LevelCapTier::EarlyHardmode,
            }
        );

        assert_eq!(
            world.on_boss_killed(&wof, &bosses, &config),
            BossKillOutcome::AlreadyCounted
        );
        assert_eq!(world.world_level(), 5);
        assert_eq!(world.level_cap(), 32);
    }

    #[test]
    fn unknown_boss_is_a_no_op() {
        let config = ProgressionConfig::default();
        let mut world = WorldProgressionState::new(&config);
        let before = world.clone();

        let outcome = world.on_boss_killed(&BossId::from("modded:missing"), &table(), &config);

        assert_eq!(outcome, BossKillOutcome::Unknown);
        assert_eq!(world, before);
    }

    #[test]
    fn world_level_is_monotonic_under_any_kill_sequence() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        let sequence = [
            "king_slime",
            "king_slime",
            "destroyer",
            "eye_of_cthulhu",
            "destroyer",
            "wall_of_flesh",
            "king_slime",
        ];

        let mut previous = world.world_level();
        for id in sequence {
            world.on_boss_killed(&BossId::from(id), &bosses, &config);
            assert!(world.world_level() >= previous);
            previous = world.world_level();
        }
        assert_eq!(world.world_level(), 30);
    }

    #[test]
    fn recalculation_is_idempotent() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        world.on_boss_killed(&BossId::from("eye_of_cthulhu"), &bosses, &config);
        world.on_boss_killed(&BossId::from("wall_of_flesh"), &bosses, &config);
        let snapshot = world.clone();

        world.recalculate_world_level(&bosses, &config);
        world.recalculate_world_level(&bosses, &config);

        assert_eq!(world, snapshot);
    }

    #[test]
    fn missing_boss_content_keeps_recorded_contribution() {
        let config = ProgressionConfig::default();
        let mut world = WorldProgressionState::new(&config);
        world.on_boss_killed(&BossId::from("eye_of_cthulhu"), &table(), &config);
        world.on_boss_killed(&BossId::from("wall_of_flesh"), &table(), &config);
        let before = world.clone();

        let without_wof = StaticBossTable::new([boss("eye_of_cthulhu", 3, 5, false)]);
        world.recalculate_world_level(&without_wof, &config);

        assert_eq!(world, before);
        assert_eq!(world.world_level(), 8);
        assert!(world.is_hardmode());
        assert_eq!(world.level_cap(), 37);
    }

    #[test]
    fn rebalanced_boss_never_lowers_the_world() {
        let config = ProgressionConfig::default();
        let mut world = WorldProgressionState::new(&config);
        let destroyer = BossId::from("destroyer");
        world.on_boss_killed(&destroyer, &table(), &config);

        let weaker = StaticBossTable::new([boss("destroyer", 4, 1, false)]);
        world.recalculate_world_level(&weaker, &config);
        assert_eq!(world.world_level(), 20);

        let stronger = StaticBossTable::new([boss("destroyer", 25, 10, false)]);
        world.recalculate_world_level(&stronger, &config);
        assert_eq!(world.world_level(), 25);
        assert_eq!(world.contribution(&destroyer).map(|c| c.world_level), Some(25));
    }

    #[test]
    fn effective_level_is_capped_only_after_hardmode() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);

        world.on_boss_killed(&BossId::from("skeleton"), &bosses, &config);
        world.on_boss_killed(&BossId::from("destroyer"), &bosses, &config);
        assert!(!world.is_hardmode());
        assert_eq!(world.effective_world_level(&config), world.world_level());

        world.on_boss_killed(&BossId::from("wall_of_flesh"), &bosses, &config);
        assert!(world.is_hardmode());
        assert_eq!(world.world_level(), 40);
        assert_eq!(world.effective_world_level(&config), config.world.pre_hardmode_ceiling);
        assert!(world.effective_world_level(&config) <= world.world_level());
    }

    #[test]
    fn tier_stays_pre_hardmode_without_hardmode_boss() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        world.on_boss_killed(&BossId::from("destroyer"), &bosses, &config);
        world.on_boss_killed(&BossId::from("skeleton"), &bosses, &config);

        assert_eq!(world.world_level(), 35);
        assert_eq!(world.tier(), LevelCapTier::PreHardmode);
    }

    #[test]
    fn unlock_all_matches_individual_kills() {
        let config = ProgressionConfig::default();
        let bosses = table();

        let mut unlocked = WorldProgressionState::new(&config);
        assert_eq!(unlocked.unlock_all_bosses(&bosses, &config), 5);
        assert_eq!(unlocked.unlock_all_bosses(&bosses, &config), 0);

        let mut killed = WorldProgressionState::new(&config);
        for id in bosses.boss_ids() {
            killed.on_boss_killed(&id, &bosses, &config);
        }

        assert_eq!(unlocked, killed);
        assert_eq!(unlocked.tier(), LevelCapTier::PostMechs);
    }

    #[test]
    fn unlimited_tier_lifts_level_cap() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        world.on_boss_killed(&BossId::from("wall_of_flesh"), &bosses, &config);

        world.set_debug_world_level(80, &bosses, &config).unwrap();

        assert_eq!(world.tier(), LevelCapTier::Unlimited);
        assert_eq!(world.level_cap(), config.leveling.max_level);
    }

    #[test]
    fn debug_level_cannot_lower_the_world() {
        let config = ProgressionConfig::default();
        let bosses = table();
        let mut world = WorldProgressionState::new(&config);
        world.on_boss_killed(&BossId::from("destroyer"), &bosses, &config);

        let err = world.set_debug_world_level(3, &bosses, &config).unwrap_err();
        assert_eq!(
            err,
            WorldError::WouldDecrease {
                requested: 3,
                current: 20
            }
        );
        assert_eq!(world.world_level(), 20);
    }
}
