//! Level, experience, job and point pools of one character.

use crate::config::LevelingConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::formula::xp_required_for_level;
use crate::job::Job;

use super::stats::{Attribute, Attributes};

/// Points earned from levels and grants, and where they went.
///
/// `available + pending + spent == earned(level) + bonus` holds after every
/// operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointPool {
    pub available: u32,
    /// Staged but not committed. Always 0 for skill points.
    pub pending: u32,
    pub spent: u32,
    /// Granted outside of leveling (commands, quest rewards).
    pub bonus: u32,
}

impl PointPool {
    fn earned(level: u32, per_level: u32) -> u32 {
        level.saturating_sub(1).saturating_mul(per_level)
    }

    /// Recomputes `available` from the level, keeping spent and pending.
    fn rederive(&mut self, level: u32, per_level: u32) {
        let total = Self::earned(level, per_level).saturating_add(self.bonus);
        self.available = total.saturating_sub(self.spent + self.pending);
    }

    fn refund(&mut self) -> u32 {
        let refunded = self.spent + self.pending;
        self.available += refunded;
        self.spent = 0;
        self.pending = 0;
        refunded
    }
}

/// What a call to [`CharacterProgression::gain_experience`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpReport {
    pub previous_level: u32,
    pub level: u32,
    pub stat_points: u32,
    pub skill_points: u32,
    /// XP beyond the threshold at the level cap.
    pub xp_discarded: u64,
}

impl LevelUpReport {
    pub fn levels_gained(&self) -> u32 {
        self.level - self.previous_level
    }

    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }
}

/// Persistent progression state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProgression {
    level: u32,
    xp: u64,
    xp_required: u64,
    job: Job,
    stat_points: PointPool,
    skill_points: PointPool,
    /// Base plus committed allocations.
    attributes: Attributes,
    /// Allocations waiting for `commit` or `cancel`.
    staged: Attributes,
}

impl CharacterProgression {
    pub fn new(config: &LevelingConfig) -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_required: xp_required_for_level(1, config),
            job: Job::BASE,
            stat_points: PointPool::default(),
            skill_points: PointPool::default(),
            attributes: Attributes::BASE,
            staged: Attributes::ZERO,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn xp_required(&self) -> u64 {
        self.xp_required
    }

    pub fn job(&self) -> Job {
        self.job
    }

    pub fn stat_points(&self) -> &PointPool {
        &self.stat_points
    }

    pub fn skill_points(&self) -> &PointPool {
        &self.skill_points
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn staged(&self) -> &Attributes {
        &self.staged
    }

    /// Adds XP and levels up while the threshold is met and the level is
    /// below `level_cap`. At the cap, XP above the threshold is discarded.
    pub fn gain_experience(
        &mut self,
        amount: u64,
        level_cap: u32,
        config: &LevelingConfig,
    ) -> LevelUpReport {
        let previous_level = self.level;
        let cap = level_cap.max(1);
        let mut report = LevelUpReport {
            previous_level,
            level: previous_level,
            ..LevelUpReport::default()
        };

        self.xp = self.xp.saturating_add(amount);
        while self.level < cap && self.xp >= self.xp_required {
            self.xp -= self.xp_required;
            self.level += 1;
            self.xp_required = xp_required_for_level(self.level, config);

            self.stat_points.available += config.stat_points_per_level;
            self.skill_points.available += config.skill_points_per_level;
            report.stat_points += config.stat_points_per_level;
            report.skill_points += config.skill_points_per_level;
        }

        if self.level >= cap && self.xp > self.xp_required {
            report.xp_discarded = self.xp - self.xp_required;
            self.xp = self.xp_required;
        }

        report.level = self.level;
        report
    }

    /// Sets the level directly, clamped to `[1, level_cap]`.
    ///
    /// XP restarts at zero. Lowering the level refunds every allocated point
    /// before the pools are re-derived, so no allocation outlives the levels
    /// that paid for it.
    pub fn set_level(&mut self, level: u32, level_cap: u32, config: &LevelingConfig) -> u32 {
        let target = level.clamp(1, level_cap.max(1));
        if target < self.level {
            self.refund_stat_points();
            self.refund_skill_points();
        }

        self.level = target;
        self.xp = 0;
        self.xp_required = xp_required_for_level(target, config);
        self.stat_points
            .rederive(target, config.stat_points_per_level);
        self.skill_points
            .rederive(target, config.skill_points_per_level);
        target
    }

    /// Replaces the job. Returns the previous one.
    pub fn set_job(&mut self, job: Job) -> Job {
        std::mem::replace(&mut self.job, job)
    }

    pub fn add_stat_points(&mut self, amount: u32) {
        self.stat_points.bonus = self.stat_points.bonus.saturating_add(amount);
        self.stat_points.available = self.stat_points.available.saturating_add(amount);
    }

    pub fn add_skill_points(&mut self, amount: u32) {
        self.skill_points.bonus = self.skill_points.bonus.saturating_add(amount);
        self.skill_points.available = self.skill_points.available.saturating_add(amount);
    }

    /// Deducts `cost` skill points if available.
    pub fn spend_skill_points(&mut self, cost: u32) -> bool {
        if self.skill_points.available < cost {
            return false;
        }
        self.skill_points.available -= cost;
        self.skill_points.spent += cost;
        true
    }

    /// Returns every spent skill point. The caller resets the ranks.
    pub fn refund_skill_points(&mut self) -> u32 {
        self.skill_points.refund()
    }

    /// Returns every spent and staged stat point and restores base attributes.
    pub fn refund_stat_points(&mut self) -> u32 {
        self.attributes = Attributes::BASE;
        self.staged = Attributes::ZERO;
        self.stat_points.refund()
    }

    /// Moves `amount` available stat points onto `attribute`, pending commit.
    pub fn stage(&mut self, attribute: Attribute, amount: u32) -> Result<(), PointError> {
        if amount == 0 {
            return Err(PointError::ZeroAmount);
        }
        if self.stat_points.available < amount {
            return Err(PointError::Insufficient {
                requested: amount,
                available: self.stat_points.available,
            });
        }

        self.stat_points.available -= amount;
        self.stat_points.pending += amount;
        *self.staged.get_mut(attribute) += amount;
        Ok(())
    }

    /// Applies staged allocations. Returns the number of points committed.
    pub fn commit(&mut self) -> u32 {
        let committed = self.stat_points.pending;
        self.attributes = self.attributes.plus(&self.staged);
        self.staged = Attributes::ZERO;
        self.stat_points.spent += committed;
        self.stat_points.pending = 0;
        committed
    }

    /// Drops staged allocations. Returns the number of points given back.
    pub fn cancel(&mut self) -> u32 {
        let returned = self.stat_points.pending;
        self.staged = Attributes::ZERO;
        self.stat_points.available += returned;
        self.stat_points.pending = 0;
        returned
    }

    /// Back to level 1 and the base job with every point refunded.
    ///
    /// Bonus grants survive the reset as available points.
    pub fn reset(&mut self, config: &LevelingConfig) {
        self.refund_stat_points();
        self.refund_skill_points();
        self.job = Job::BASE;
        self.set_level(1, 1, config);
    }
}

/// Rejected point allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PointError {
    #[error("cannot allocate zero points")]
    ZeroAmount,

    #[error("requested {requested} stat points, {available} available")]
    Insufficient { requested: u32, available: u32 },
}

impl GameError for PointError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "POINTS_ZERO_AMOUNT",
            Self::Insufficient { .. } => "POINTS_INSUFFICIENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::total_xp_for_level;

    fn config() -> LevelingConfig {
        LevelingConfig::default()
    }

    #[test]
    fn exact_threshold_levels_up_and_grants_points() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);

        let report = progression.gain_experience(125, 20, &config);

        assert_eq!(report.levels_gained(), 1);
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.xp(), 0);
        assert_eq!(progression.xp_required(), xp_required_for_level(2, &config));
        assert_eq!(progression.stat_points().available, 3);
        assert_eq!(progression.skill_points().available, 1);
    }

    #[test]
    fn large_award_levels_multiple_times() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);

        let report = progression.gain_experience(total_xp_for_level(10, &config) + 7, 20, &config);

        assert_eq!(report.level, 10);
        assert_eq!(report.skill_points, 9);
        assert_eq!(progression.xp(), 7);
    }

    #[test]
    fn overflow_at_cap_is_discarded() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);

        let report = progression.gain_experience(u64::MAX / 2, 5, &config);

        assert_eq!(progression.level(), 5);
        assert_eq!(progression.xp(), progression.xp_required());
        assert!(report.xp_discarded > 0);

        // a later cap raise resumes leveling from the clamped bar
        let report = progression.gain_experience(0, 6, &config);
        assert_eq!(report.level, 6);
    }

    #[test]
    fn lowering_level_refunds_allocations() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);
        progression.set_level(10, 20, &config);
        progression.stage(Attribute::Strength, 6).unwrap();
        progression.commit();
        assert!(progression.spend_skill_points(4));

        progression.set_level(4, 20, &config);

        assert_eq!(progression.attributes(), &Attributes::BASE);
        assert_eq!(progression.stat_points().spent, 0);
        assert_eq!(progression.stat_points().available, 9);
        assert_eq!(progression.skill_points().available, 3);
    }

    #[test]
    fn set_level_is_clamped_to_cap() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);
        assert_eq!(progression.set_level(500, 32, &config), 32);
        assert_eq!(progression.set_level(0, 32, &config), 1);
    }

    #[test]
    fn staging_commits_or_cancels() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);
        progression.add_stat_points(5);

        assert_eq!(
            progression.stage(Attribute::Luck, 6),
            Err(PointError::Insufficient {
                requested: 6,
                available: 5
            })
        );

        progression.stage(Attribute::Luck, 3).unwrap();
        assert_eq!(progression.stat_points().pending, 3);
        assert_eq!(progression.cancel(), 3);
        assert_eq!(progression.stat_points().available, 5);

        progression.stage(Attribute::Luck, 2).unwrap();
        assert_eq!(progression.commit(), 2);
        assert_eq!(progression.attributes().luck, Attributes::BASE.luck + 2);
        assert_eq!(progression.stat_points().spent, 2);
    }

    #[test]
    fn reset_returns_to_level_one_and_keeps_bonus_points() {
        let config = config();
        let mut progression = CharacterProgression::new(&config);
        progression.set_level(8, 20, &config);
        progression.set_job(Job::Warrior);
        progression.add_skill_points(2);
        assert!(progression.spend_skill_points(5));

        progression.reset(&config);

        assert_eq!(progression.level(), 1);
        assert_eq!(progression.job(), Job::Novice);
        assert_eq!(progression.skill_points().spent, 0);
        assert_eq!(progression.skill_points().available, 2);
    }
}
