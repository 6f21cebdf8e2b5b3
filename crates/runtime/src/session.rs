//! Single-threaded progression session.
//!
//! A [`Session`] owns every mutable piece of one game world: the characters,
//! the live hostile entities and their attribution maps, the world
//! progression ledger and active world events. The host game drives it with
//! fixed ticks and reports spawns, damage and deaths; the session resolves
//! rules through `progression-core` and publishes what changed on the
//! [`EventBus`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use progression_core::{
    AttributionLedger, AttributionWindow, BossId, BossKillOutcome, Character, CharacterId,
    DamageRequest, DamageSource, EntityDescriptor, EntityId, ExperienceEngine, Job,
    LevelUpReport, SkillId, SkillTemplate, SpawnScaling, Tick, WorldEvent, WorldEvents,
    WorldProgressionState, compute_seed, distribute_xp, resolve_damage,
};

use crate::api::{Award, KillReport, Result, SessionError, SkillUse};
use crate::commands::{self, CommandError};
use crate::events::{CombatEvent, Event, EventBus, ProgressionEvent, Topic, WorldStateEvent};
use crate::hooks::{HookContext, HookRegistry, spawn_scaling_for};
use crate::oracle::OracleManager;
use crate::repository::{CharacterRepository, WorldRepository};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name the world is saved under.
    pub world_name: String,
    /// Directory for file repositories.
    pub save_dir: PathBuf,
    /// Game seed; every damage roll derives from it.
    pub seed: u64,
    pub event_buffer_size: usize,
}

impl SessionConfig {
    /// Platform data directory for saves.
    ///
    /// - Linux: `~/.local/share/progression/saves`
    /// - macOS: `~/Library/Application Support/progression/saves`
    /// - Windows: `%APPDATA%\progression\saves`
    /// - Fallback: `./save_data/saves`
    pub fn default_save_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "progression")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("saves")
    }

    /// Fixed seed, for reproducible sessions and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world_name: "world".to_owned(),
            save_dir: Self::default_save_dir(),
            seed: rand::random(),
            event_buffer_size: 100,
        }
    }
}

/// One running world.
pub struct Session {
    config: SessionConfig,
    oracles: OracleManager,
    hooks: HookRegistry,
    bus: EventBus,
    clock: Tick,
    /// Rolls made so far; keeps seeds distinct within one tick.
    rolls: u32,
    characters: BTreeMap<CharacterId, Character>,
    entities: BTreeMap<EntityId, EntityDescriptor>,
    ledger: AttributionLedger,
    world: WorldProgressionState,
    events: WorldEvents,
}

impl Session {
    /// Creates a session on a fresh world with the default hooks.
    pub fn new(oracles: OracleManager, config: SessionConfig) -> Self {
        let bus = EventBus::with_capacity(config.event_buffer_size);
        let world = WorldProgressionState::new(oracles.config());
        Self {
            config,
            oracles,
            hooks: HookRegistry::default_hooks(),
            bus,
            clock: Tick::ZERO,
            rolls: 0,
            characters: BTreeMap::new(),
            entities: BTreeMap::new(),
            ledger: AttributionLedger::new(),
            world,
            events: WorldEvents::default(),
        }
    }

    /// Replaces the post-kill hooks.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    // ===== accessors =====

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn world(&self) -> &WorldProgressionState {
        &self.world
    }

    pub fn world_events(&self) -> &WorldEvents {
        &self.events
    }

    pub fn ledger(&self) -> &AttributionLedger {
        &self.ledger
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn attribution_window(&self) -> AttributionWindow {
        let config = self.oracles.config();
        AttributionWindow::new(&config.attribution, config.attribution_timeout_ticks())
    }

    /// Looks up a skill template in the catalog.
    pub fn template(&self, skill: &SkillId) -> Result<&SkillTemplate> {
        self.oracles
            .skills()
            .template(skill)
            .ok_or_else(|| SessionError::UnknownSkill(skill.clone()))
    }

    // ===== characters =====

    /// Creates a fresh level-1 character.
    pub fn add_character(&mut self, id: CharacterId) -> Result<&mut Character> {
        let character = Character::new(id, self.oracles.skills(), &self.oracles.config().leveling);
        self.insert_character(character)?;
        self.character_mut(id)
    }

    pub fn insert_character(&mut self, mut character: Character) -> Result<()> {
        if self.characters.contains_key(&character.id) {
            return Err(SessionError::DuplicateCharacter(character.id));
        }
        character.skills.sync_with(self.oracles.skills());
        character.refresh(self.oracles.skills());
        debug!(character = %character.id, level = character.level(), "character joined");
        self.characters.insert(character.id, character);
        Ok(())
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character> {
        self.characters
            .get(&id)
            .ok_or(SessionError::UnknownCharacter(id))
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    // ===== simulation =====

    /// Advances the clock by `ticks`: cooldowns run down, passives are
    /// reapplied and stale attribution maps are pruned.
    pub fn tick(&mut self, ticks: u64) {
        self.clock = self.clock + ticks;
        let seconds = ticks as f32 / self.oracles.config().ticks_per_second.max(1) as f32;

        let skills = self.oracles.skills();
        for character in self.characters.values_mut() {
            character.tick(seconds, skills);
        }

        let window = self.attribution_window();
        let pruned = self.ledger.prune(self.clock, &window);
        if pruned > 0 {
            trace!(clock = %self.clock, pruned, "pruned stale attribution maps");
        }
    }

    /// Registers a spawning hostile entity and returns its scaling.
    pub fn spawn(&mut self, entity: EntityId, descriptor: EntityDescriptor) -> SpawnScaling {
        let scaling = spawn_scaling_for(&descriptor, &self.world, self.oracles.config());
        debug!(
            %entity,
            name = %descriptor.name,
            life = scaling.life,
            damage = scaling.damage,
            "entity spawned"
        );
        self.entities.insert(entity, descriptor);
        scaling
    }

    /// Entity left without dying. Its attribution map is discarded.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        let known = self.entities.remove(&entity).is_some();
        self.ledger.despawn(entity);
        if known {
            self.bus.publish(CombatEvent::EntityDespawned {
                entity,
                clock: self.clock,
            });
        }
        known
    }

    pub fn entity(&self, entity: EntityId) -> Option<&EntityDescriptor> {
        self.entities.get(&entity)
    }

    /// Records damage dealt to a live entity. Returns the credited character.
    pub fn record_damage(
        &mut self,
        entity: EntityId,
        source: DamageSource,
        amount: u32,
    ) -> Result<Option<CharacterId>> {
        if !self.entities.contains_key(&entity) {
            return Err(SessionError::UnknownEntity(entity));
        }

        let window = self.attribution_window();
        let credited = self
            .ledger
            .record(entity, source, amount, self.clock, &window);
        trace!(%entity, ?source, amount, ?credited, "damage recorded");
        self.bus.publish(CombatEvent::DamageRecorded {
            entity,
            source,
            amount,
            credited,
            clock: self.clock,
        });
        Ok(credited)
    }

    /// Marks `character` as the last one to interact with a live entity.
    pub fn record_interaction(&mut self, entity: EntityId, character: CharacterId) -> Result<()> {
        if !self.entities.contains_key(&entity) {
            return Err(SessionError::UnknownEntity(entity));
        }
        self.ledger
            .record_interaction(entity, character, self.clock);
        Ok(())
    }

    // ===== skills =====

    /// Learns one rank of `skill`. Returns the new rank.
    pub fn learn_skill(&mut self, id: CharacterId, skill: &SkillId) -> Result<u32> {
        let oracles = self.oracles.clone();
        let template = oracles
            .skills()
            .template(skill)
            .ok_or_else(|| SessionError::UnknownSkill(skill.clone()))?;
        let character = self.character_mut(id)?;

        let rank = character.learn_skill(template)?;
        character.refresh(oracles.skills());

        debug!(character = %id, %skill, rank, "skill learned");
        self.bus.publish(ProgressionEvent::SkillLearned {
            character: id,
            skill: skill.clone(),
            rank,
        });
        Ok(rank)
    }

    pub fn assign_hotbar(&mut self, id: CharacterId, slot: usize, skill: &SkillId) -> Result<()> {
        self.character_mut(id)?.skills.assign_hotbar(slot, skill)?;
        Ok(())
    }

    /// Activates `skill`, and when it deals damage and `target` is given,
    /// resolves the hit and attributes it to the character.
    ///
    /// An unknown target is rejected before anything is spent.
    pub fn use_skill(
        &mut self,
        id: CharacterId,
        skill: &SkillId,
        target: Option<EntityId>,
    ) -> Result<SkillUse> {
        let oracles = self.oracles.clone();
        let config = oracles.config();
        let template = oracles
            .skills()
            .template(skill)
            .ok_or_else(|| SessionError::UnknownSkill(skill.clone()))?;
        let target = match target {
            Some(entity) => {
                let descriptor = self
                    .entities
                    .get(&entity)
                    .ok_or(SessionError::UnknownEntity(entity))?;
                Some((entity, descriptor.defense))
            }
            None => None,
        };

        let seed = compute_seed(self.config.seed, self.clock.0, id.0, self.rolls);
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))?;
        let activation = character.activate_skill(template, oracles.behaviors(), oracles.effects())?;

        let hit = match target {
            Some((entity, defense)) if template.base_power > 0 => {
                let request = DamageRequest {
                    base_power: template.base_power,
                    class: template.damage_class,
                    rank_scaling: template.ranks.damage(activation.rank),
                    crit_multiplier: template.crit_multiplier,
                    target_defense: defense,
                };
                let derived = character.derived();
                let result = resolve_damage(
                    &request,
                    derived.classes.get(template.damage_class),
                    derived.luck,
                    &oracles.rng,
                    seed,
                    &config.damage,
                );
                self.rolls = self.rolls.wrapping_add(1);
                self.record_damage(entity, DamageSource::Character(id), result.amount)?;
                Some(result)
            }
            _ => None,
        };

        debug!(
            character = %id,
            %skill,
            rank = activation.rank,
            damage = hit.map(|h| h.amount),
            "skill used"
        );
        self.bus.publish(CombatEvent::SkillUsed {
            character: id,
            skill: skill.clone(),
            rank: activation.rank,
            hit,
            clock: self.clock,
        });
        Ok(SkillUse { activation, hit })
    }

    // ===== kills and experience =====

    /// Resolves the death of a live entity: consumes its attribution map,
    /// awards XP to every eligible contributor, counts a boss kill, then runs
    /// the post-kill hooks.
    ///
    /// A second call for the same entity fails with `UnknownEntity`, so a
    /// kill is only ever rewarded once.
    pub fn kill(&mut self, entity: EntityId) -> Result<KillReport> {
        let descriptor = self
            .entities
            .remove(&entity)
            .ok_or(SessionError::UnknownEntity(entity))?;
        let oracles = self.oracles.clone();
        let config = oracles.config();
        let window = self.attribution_window();

        let map = self.ledger.consume(entity).unwrap_or_default();
        let eligible: Vec<CharacterId> = map
            .eligible(self.clock, &window)
            .into_iter()
            .filter(|id| self.characters.contains_key(id))
            .collect();
        let average_party_level = if eligible.is_empty() {
            1.0
        } else {
            let total: u64 = eligible
                .iter()
                .filter_map(|id| self.characters.get(id))
                .map(|c| c.level() as u64)
                .sum();
            total as f64 / eligible.len() as f64
        };

        let engine = ExperienceEngine::new(config, oracles.bosses(), oracles.content());
        let xp = engine.kill_xp(&descriptor, &self.world, &self.events, average_party_level);

        let mut awards = Vec::with_capacity(eligible.len());
        for (character, amount) in distribute_xp(&eligible, xp.total) {
            let level_up = self.award_experience(character, amount)?;
            awards.push(Award {
                character,
                xp: amount,
                level_up,
            });
        }
        if awards.is_empty() {
            debug!(%entity, name = %descriptor.name, "kill had no eligible contributors");
        }

        let boss = descriptor.boss_id().map(|boss| self.count_boss(boss));

        let report = KillReport {
            entity,
            name: descriptor.name,
            xp,
            awards,
            boss,
        };
        info!(
            %entity,
            name = %report.name,
            xp = report.xp.total,
            contributors = report.awards.len(),
            "entity killed"
        );
        self.bus.publish(CombatEvent::EntityKilled {
            report: Box::new(report.clone()),
            clock: self.clock,
        });

        let ctx = HookContext {
            report: &report,
            world: &self.world,
            oracles: &oracles,
            clock: self.clock,
        };
        self.hooks.execute_hooks(&ctx)?;

        Ok(report)
    }

    /// Grants XP under the current level cap.
    pub fn award_experience(&mut self, id: CharacterId, amount: u64) -> Result<LevelUpReport> {
        let cap = self.world.level_cap();
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))?;
        let report = character.gain_experience(amount, cap, &self.oracles.config.leveling);
        if report.leveled_up() {
            character.refresh(self.oracles.skills.as_ref());
        }

        self.bus.publish(ProgressionEvent::ExperienceGained {
            character: id,
            amount,
            clock: self.clock,
        });
        self.announce_level_up(id, report);
        Ok(report)
    }

    fn announce_level_up(&self, id: CharacterId, report: LevelUpReport) {
        if !report.leveled_up() {
            return;
        }
        info!(
            character = %id,
            from = report.previous_level,
            to = report.level,
            stat_points = report.stat_points,
            skill_points = report.skill_points,
            "level up"
        );
        self.bus.publish(ProgressionEvent::LevelUp {
            character: id,
            report,
        });
    }

    /// Counts a boss kill on the world ledger.
    fn count_boss(&mut self, boss: &BossId) -> BossKillOutcome {
        let outcome =
            self.world
                .on_boss_killed(boss, self.oracles.bosses.as_ref(), &self.oracles.config);
        match &outcome {
            BossKillOutcome::Counted {
                previous_world_level,
                ..
            } => {
                info!(
                    %boss,
                    world_level = self.world.world_level(),
                    level_cap = self.world.level_cap(),
                    tier = %self.world.tier(),
                    "boss counted"
                );
                self.world_changed(*previous_world_level);
            }
            BossKillOutcome::AlreadyCounted => debug!(%boss, "boss already counted"),
            BossKillOutcome::Unknown => warn!(%boss, "boss has no progression data"),
        }
        self.bus.publish(WorldStateEvent::BossKilled {
            boss: boss.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Publishes the new world level and lets characters held at the old cap
    /// resume leveling.
    fn world_changed(&mut self, previous: u32) {
        self.bus.publish(WorldStateEvent::WorldLevelChanged {
            previous,
            world_level: self.world.world_level(),
            level_cap: self.world.level_cap(),
            tier: self.world.tier(),
        });

        let cap = self.world.level_cap();
        let mut leveled = Vec::new();
        for character in self.characters.values_mut() {
            let report = character.gain_experience(0, cap, &self.oracles.config.leveling);
            if report.leveled_up() {
                character.refresh(self.oracles.skills.as_ref());
                leveled.push((character.id, report));
            }
        }
        for (id, report) in leveled {
            self.announce_level_up(id, report);
        }
    }

    // ===== world =====

    pub fn start_event(&mut self, event: WorldEvent) -> bool {
        let started = self.events.start(event);
        if started {
            info!(%event, "world event started");
            self.bus.publish(WorldStateEvent::EventStarted(event));
        }
        started
    }

    pub fn end_event(&mut self, event: WorldEvent) -> bool {
        let ended = self.events.end(event);
        if ended {
            info!(%event, "world event ended");
            self.bus.publish(WorldStateEvent::EventEnded(event));
        }
        ended
    }

    /// Debug: raises the world level. Lower values are rejected.
    pub fn set_world_level(&mut self, level: u32) -> Result<u32> {
        let previous = self.world.world_level();
        let world_level = self.world.set_debug_world_level(
            level,
            self.oracles.bosses.as_ref(),
            &self.oracles.config,
        )?;
        if world_level != previous {
            self.world_changed(previous);
        }
        Ok(world_level)
    }

    /// Debug: counts every registered boss. Returns how many were new.
    pub fn unlock_all_bosses(&mut self) -> usize {
        let previous = self.world.world_level();
        let unlocked = self
            .world
            .unlock_all_bosses(self.oracles.bosses.as_ref(), &self.oracles.config);
        info!(unlocked, world_level = self.world.world_level(), "unlocked all bosses");
        if unlocked > 0 {
            self.world_changed(previous);
        }
        unlocked
    }

    // ===== debug character edits =====

    /// Debug level change, clamped to `[1, level cap]`.
    pub fn set_level(&mut self, id: CharacterId, level: u32) -> Result<u32> {
        let cap = self.world.level_cap();
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))?;
        let level = character.set_level(level, cap, &self.oracles.config.leveling);
        character.refresh(self.oracles.skills.as_ref());
        info!(character = %id, level, "level set");
        Ok(level)
    }

    /// Replaces the job. Returns the previous one.
    pub fn set_job(&mut self, id: CharacterId, job: Job) -> Result<Job> {
        let previous = self.character_mut(id)?.progression.set_job(job);
        info!(character = %id, from = %previous, to = %job, "job changed");
        Ok(previous)
    }

    /// Every skill rank back to 0 and the hotbar cleared. Returns the
    /// refunded skill points.
    pub fn reset_skills(&mut self, id: CharacterId) -> Result<u32> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))?;
        let refunded = character.reset_skills();
        character.refresh(self.oracles.skills.as_ref());
        info!(character = %id, refunded, "skills reset");
        self.bus.publish(ProgressionEvent::SkillsReset {
            character: id,
            refunded,
        });
        Ok(refunded)
    }

    /// Back to level 1 and the base job, with every point refunded.
    pub fn reset_character(&mut self, id: CharacterId) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SessionError::UnknownCharacter(id))?;
        character.reset(&self.oracles.config.leveling);
        character.refresh(self.oracles.skills.as_ref());
        info!(character = %id, "character reset");
        self.bus
            .publish(ProgressionEvent::CharacterReset { character: id });
        Ok(())
    }

    /// Parses and executes a text command on behalf of `issuer`.
    ///
    /// Returns the player-visible outcome.
    pub fn execute_command(
        &mut self,
        issuer: CharacterId,
        input: &str,
    ) -> std::result::Result<String, CommandError> {
        let command = input.parse()?;
        commands::execute(self, issuer, command)
    }

    // ===== persistence =====

    pub fn save_character(&self, id: CharacterId, repo: &dyn CharacterRepository) -> Result<()> {
        repo.save(&self.character(id)?.to_save())?;
        Ok(())
    }

    /// Loads a saved character into the session, replacing one with the same
    /// id. Returns `false` when no save exists.
    pub fn load_character(&mut self, id: CharacterId, repo: &dyn CharacterRepository) -> Result<bool> {
        let Some(save) = repo.load(id)? else {
            return Ok(false);
        };
        let character = Character::from_save(save, self.oracles.skills());
        info!(character = %id, level = character.level(), "character loaded");
        self.characters.remove(&id);
        self.insert_character(character)?;
        Ok(true)
    }

    pub fn save_world(&self, repo: &dyn WorldRepository) -> Result<()> {
        repo.save(&self.config.world_name, &self.world)?;
        Ok(())
    }

    /// Loads the world ledger and re-derives world level, tier and cap. Boss
    /// contributions recorded in the save act as a floor, so missing or
    /// weaker boss content cannot lower the world. Returns `false` when no
    /// save exists.
    pub fn load_world(&mut self, repo: &dyn WorldRepository) -> Result<bool> {
        let Some(mut world) = repo.load(&self.config.world_name)? else {
            return Ok(false);
        };
        world.recalculate_world_level(self.oracles.bosses.as_ref(), &self.oracles.config);
        let previous = self.world.world_level();
        self.world = world;
        info!(
            world = %self.config.world_name,
            world_level = self.world.world_level(),
            level_cap = self.world.level_cap(),
            "world loaded"
        );
        self.world_changed(previous);
        Ok(true)
    }
}
