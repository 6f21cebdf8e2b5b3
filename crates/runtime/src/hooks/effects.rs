//! Cosmetic hooks that play celebration effects after a kill.

use progression_core::{BossKillOutcome, EffectId};

use super::{HookContext, HookCriticality, HookError, KillHook};

/// Plays the level-up effect on every character the kill leveled up.
#[derive(Debug, Clone)]
pub struct LevelUpEffectHook {
    effect: EffectId,
}

impl LevelUpEffectHook {
    pub fn new(effect: impl Into<EffectId>) -> Self {
        Self {
            effect: effect.into(),
        }
    }
}

impl Default for LevelUpEffectHook {
    fn default() -> Self {
        Self::new("level_up")
    }
}

impl KillHook for LevelUpEffectHook {
    fn name(&self) -> &'static str {
        "level_up_effect"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        ctx.report
            .awards
            .iter()
            .any(|award| award.level_up.leveled_up())
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let effects = ctx.oracles.effects();
        for award in ctx.report.awards.iter().filter(|a| a.level_up.leveled_up()) {
            let intensity = award.level_up.levels_gained() as f32;
            effects.play_effect_on_character(&self.effect, award.character, intensity);
        }
        Ok(())
    }
}

/// Plays the world-level effect for the killers of a boss that raised the
/// world level.
#[derive(Debug, Clone)]
pub struct WorldLevelEffectHook {
    effect: EffectId,
}

impl WorldLevelEffectHook {
    pub fn new(effect: impl Into<EffectId>) -> Self {
        Self {
            effect: effect.into(),
        }
    }
}

impl Default for WorldLevelEffectHook {
    fn default() -> Self {
        Self::new("world_level_up")
    }
}

impl KillHook for WorldLevelEffectHook {
    fn name(&self) -> &'static str {
        "world_level_effect"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        matches!(
            ctx.report.boss,
            Some(BossKillOutcome::Counted {
                previous_world_level,
                world_level,
                ..
            }) if world_level > previous_world_level
        )
    }

    fn execute(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let effects = ctx.oracles.effects();
        for award in &ctx.report.awards {
            effects.play_effect_on_character(&self.effect, award.character, 1.0);
        }
        Ok(())
    }
}
