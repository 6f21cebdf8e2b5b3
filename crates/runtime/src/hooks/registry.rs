//! Hook registry for managing and executing post-kill hooks.

use std::sync::Arc;

use tracing::{debug, error};

use super::{HookContext, HookCriticality, HookError, KillHook};

/// Registry that manages and executes post-kill hooks in priority order.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn KillHook>]>,
}

impl HookRegistry {
    /// Creates a registry. Hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn KillHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Creates a registry with no hooks.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - LevelUpEffectHook: celebrates characters who leveled up
    /// - WorldLevelEffectHook: celebrates a world level increase
    pub fn default_hooks() -> Self {
        use super::{LevelUpEffectHook, WorldLevelEffectHook};

        Self::new(vec![
            Arc::new(LevelUpEffectHook::default()) as Arc<dyn KillHook>,
            Arc::new(WorldLevelEffectHook::default()) as Arc<dyn KillHook>,
        ])
    }

    /// Executes every hook whose `should_trigger` accepts the context.
    ///
    /// # Error Handling
    ///
    /// - `Critical`: Returns the error immediately
    /// - `Important`: Logs error and continues to next hook (default)
    /// - `Optional`: Logs at debug level and continues silently
    pub fn execute_hooks(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        for hook in self.hooks.iter() {
            if !hook.should_trigger(ctx) {
                continue;
            }
            if let Err(e) = hook.execute(ctx) {
                self.handle_hook_error(hook.as_ref(), e)?;
            }
        }
        Ok(())
    }

    /// Returns the number of hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn handle_hook_error(&self, hook: &dyn KillHook, error: HookError) -> Result<(), HookError> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed"
                );
                return Err(error);
            }
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "important",
                error = %error,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = "optional",
                error = %error,
                "Optional hook failed"
            ),
        }
        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}
