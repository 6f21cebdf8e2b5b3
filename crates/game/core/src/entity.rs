//! Hostile entity descriptors consumed by the XP pipeline and spawn scaling.

use crate::types::BossId;

/// Regular mob or boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Regular,
    Boss(BossId),
}

/// Intrinsic stats of a hostile entity, as the host game reports them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityDescriptor {
    pub name: String,
    pub kind: EntityKind,
    pub max_life: u32,
    pub defense: u32,
    /// Monster level assigned at spawn.
    pub level: u32,
    /// Content that belongs to the pre-hardmode part of the game.
    pub pre_hardmode: bool,
}

impl EntityDescriptor {
    pub fn regular(name: impl Into<String>, max_life: u32, defense: u32, level: u32) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Regular,
            max_life,
            defense,
            level,
            pre_hardmode: true,
        }
    }

    pub fn boss(name: impl Into<String>, boss: BossId, max_life: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Boss(boss),
            max_life,
            defense,
            level: 0,
            pre_hardmode: true,
        }
    }

    /// Marks the entity as hardmode content (builder pattern).
    #[must_use]
    pub fn hardmode(mut self) -> Self {
        self.pre_hardmode = false;
        self
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EntityKind::Boss(_))
    }

    pub fn boss_id(&self) -> Option<&BossId> {
        match &self.kind {
            EntityKind::Boss(id) => Some(id),
            EntityKind::Regular => None,
        }
    }
}
