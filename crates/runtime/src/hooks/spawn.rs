//! Spawn-time scaling.

use progression_core::{
    EntityDescriptor, ProgressionConfig, SpawnScaling, WorldProgressionState, spawn_scaling,
};

/// HP and damage multipliers for an entity spawning into `world`.
///
/// Pre-hardmode content scales by the effective world level, everything else
/// by the raw world level.
pub fn spawn_scaling_for(
    entity: &EntityDescriptor,
    world: &WorldProgressionState,
    config: &ProgressionConfig,
) -> SpawnScaling {
    spawn_scaling(world.world_level_for(entity, config), &config.world)
}
