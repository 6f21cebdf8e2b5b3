//! Boss progression oracle.

use std::collections::BTreeMap;

use crate::types::BossId;

/// What counting a boss kill contributes to world progression.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossProgression {
    pub id: BossId,
    pub display_name: String,
    /// Boss level used by the catch-up XP curve.
    pub level: u32,
    /// World levels granted the first time this boss is counted.
    pub world_level: u32,
    /// Level cap increase granted the first time this boss is counted.
    pub level_cap: u32,
    /// Counting this boss starts hardmode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub starts_hardmode: bool,
}

/// Oracle mapping boss ids to their progression increments.
///
/// Bosses added by content that is not installed are simply absent; callers
/// treat a missing entry as a no-op.
pub trait BossOracle: Send + Sync {
    fn boss(&self, id: &BossId) -> Option<&BossProgression>;

    /// Every registered boss id, ordered.
    fn boss_ids(&self) -> Vec<BossId>;
}

/// In-memory boss table.
#[derive(Clone, Debug, Default)]
pub struct StaticBossTable {
    bosses: BTreeMap<BossId, BossProgression>,
}

impl StaticBossTable {
    pub fn new(bosses: impl IntoIterator<Item = BossProgression>) -> Self {
        Self {
            bosses: bosses
                .into_iter()
                .map(|boss| (boss.id.clone(), boss))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }
}

impl BossOracle for StaticBossTable {
    fn boss(&self, id: &BossId) -> Option<&BossProgression> {
        self.bosses.get(id)
    }

    fn boss_ids(&self) -> Vec<BossId> {
        self.bosses.keys().cloned().collect()
    }
}
