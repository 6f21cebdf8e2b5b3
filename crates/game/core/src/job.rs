//! Jobs and their lineage.
//!
//! Every job except [`Job::Novice`] has exactly one parent. A skill gated on
//! job `A` is available to `A` and to every job that descends from `A`.

use crate::error::{ErrorSeverity, GameError};

/// Character job, arranged in tiers.
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
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Job {
    /// Starting job (tier 0)
    #[default]
    Novice,

    // Tier 1
    Warrior,
    Ranger,
    Mage,
    Summoner,

    // Tier 2
    Knight,
    Berserker,
    Sniper,
    Gunslinger,
    Sorcerer,
    Cleric,
    Beastmaster,
    Necromancer,
}

/// Explicit name table used by command input and content files.
///
/// Aliases are allowed; every job must appear at least once, which
/// [`Job::validate_lookup_table`] checks whenever content is loaded.
const JOB_NAMES: &[(&str, Job)] = &[
    ("novice", Job::Novice),
    ("warrior", Job::Warrior),
    ("ranger", Job::Ranger),
    ("archer", Job::Ranger),
    ("mage", Job::Mage),
    ("summoner", Job::Summoner),
    ("knight", Job::Knight),
    ("berserker", Job::Berserker),
    ("sniper", Job::Sniper),
    ("gunslinger", Job::Gunslinger),
    ("gunner", Job::Gunslinger),
    ("sorcerer", Job::Sorcerer),
    ("cleric", Job::Cleric),
    ("beastmaster", Job::Beastmaster),
    ("necromancer", Job::Necromancer),
];

impl Job {
    pub const BASE: Job = Job::Novice;

    /// Direct ancestor, `None` for the base job.
    pub const fn parent(self) -> Option<Job> {
        use Job::*;
        match self {
            Novice => None,
            Warrior | Ranger | Mage | Summoner => Some(Novice),
            Knight | Berserker => Some(Warrior),
            Sniper | Gunslinger => Some(Ranger),
            Sorcerer | Cleric => Some(Mage),
            Beastmaster | Necromancer => Some(Summoner),
        }
    }

    /// Depth in the lineage tree (Novice = 0).
    pub fn tier(self) -> u8 {
        self.lineage().count() as u8 - 1
    }

    /// This job followed by its ancestors up to the base job.
    pub fn lineage(self) -> impl Iterator<Item = Job> {
        std::iter::successors(Some(self), |job| job.parent())
    }

    /// True if `self` equals `ancestor` or descends from it.
    pub fn descends_from(self, ancestor: Job) -> bool {
        self.lineage().any(|job| job == ancestor)
    }

    /// True if `next` is a direct advancement of `self`.
    pub fn can_advance_to(self, next: Job) -> bool {
        next.parent() == Some(self)
    }

    /// Resolves a job name (case-insensitive, aliases allowed).
    pub fn lookup(name: &str) -> Result<Job, JobError> {
        let name = name.trim();
        JOB_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, job)| *job)
            .ok_or_else(|| JobError::Unknown(name.to_owned()))
    }

    /// Verifies the name table covers every job and has no duplicate names.
    pub fn validate_lookup_table() -> Result<(), JobError> {
        use strum::IntoEnumIterator;

        for job in Job::iter() {
            if !JOB_NAMES.iter().any(|(_, candidate)| *candidate == job) {
                return Err(JobError::MissingName(job));
            }
        }
        for (index, (name, _)) in JOB_NAMES.iter().enumerate() {
            if JOB_NAMES[index + 1..]
                .iter()
                .any(|(other, _)| other.eq_ignore_ascii_case(name))
            {
                return Err(JobError::DuplicateName((*name).to_owned()));
            }
        }
        Ok(())
    }
}

/// Job name resolution errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JobError {
    #[error("unknown job '{0}'")]
    Unknown(String),

    #[error("job {0} has no entry in the name table")]
    MissingName(Job),

    #[error("job name '{0}' is listed twice")]
    DuplicateName(String),
}

impl GameError for JobError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unknown(_) => ErrorSeverity::Validation,
            Self::MissingName(_) | Self::DuplicateName(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unknown(_) => "JOB_UNKNOWN",
            Self::MissingName(_) => "JOB_MISSING_NAME",
            Self::DuplicateName(_) => "JOB_DUPLICATE_NAME",
        }
    }
}
