use std::sync::Arc;

use progression_content::embedded;
use progression_core::{
    BossId, BossKillOutcome, CannotLearnReason, CharacterId, DamageSource, EffectId,
    EntityDescriptor, EntityId, Job, LevelCapTier, ResourceKind, SkillId, WorldEvent,
    xp_required_for_level,
};
use progression_runtime::{
    CommandError, EffectTarget, Event, OracleManager, ProgressionEvent, RecordingEffects, Session,
    SessionConfig, SessionError, Topic, WorldStateEvent,
};

const ALICE: CharacterId = CharacterId(1);
const BOB: CharacterId = CharacterId(2);
const CAROL: CharacterId = CharacterId(3);
const DAVE: CharacterId = CharacterId(4);

fn oracles() -> OracleManager {
    OracleManager::from_content(embedded::content().expect("shipped content should load"))
}

fn session() -> Session {
    Session::new(oracles(), SessionConfig::default().with_seed(7))
}

fn zombie() -> EntityDescriptor {
    EntityDescriptor::regular("Zombie", 500, 10, 0)
}

fn wall_of_flesh() -> EntityDescriptor {
    EntityDescriptor::boss(
        "Wall of Flesh",
        BossId::from("vanilla:wall_of_flesh"),
        8000,
        12,
    )
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// A level-10 skill opens up once the character has leveled past it.
#[test]
fn learning_is_gated_by_level_until_xp_arrives() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    session.set_job(ALICE, Job::Warrior).unwrap();
    let iron_skin = SkillId::from("warrior.iron_skin");

    let template = session.template(&iron_skin).unwrap().clone();
    assert_eq!(template.required_level, 10);
    let character = session.character(ALICE).unwrap();
    assert_eq!((character.level(), character.progression.xp()), (1, 0));
    assert_eq!(
        character.cannot_learn_reason(&template),
        Some(CannotLearnReason::LevelTooLow {
            required: 10,
            current: 1
        })
    );
    assert!(matches!(
        session.learn_skill(ALICE, &iron_skin),
        Err(SessionError::CannotLearn(CannotLearnReason::LevelTooLow { .. }))
    ));

    let leveling = &session.oracles().config().leveling;
    let to_ten: u64 = (1..10).map(|level| xp_required_for_level(level, leveling)).sum();
    let report = session.award_experience(ALICE, to_ten).unwrap();
    assert!(report.leveled_up());
    let character = session.character(ALICE).unwrap();
    assert!(character.level() >= 10);
    assert!(character.progression.skill_points().available >= 1);
    assert!(character.can_learn(&template));

    assert_eq!(session.learn_skill(ALICE, &iron_skin).unwrap(), 1);
    let character = session.character(ALICE).unwrap();
    assert_eq!(character.skills.rank(&iron_skin), 1);
    assert_eq!(
        character.progression.skill_points().available,
        report.skill_points - template.point_cost
    );
}

/// Resetting skills zeroes every rank, clears the hotbar and refunds the
/// spent points.
#[test]
fn reset_skills_refunds_every_spent_point() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    session.award_experience(ALICE, 5000).unwrap();
    let bash = SkillId::from("novice.bash");
    let endurance = SkillId::from("novice.endurance");
    let before = session
        .character(ALICE)
        .unwrap()
        .progression
        .skill_points()
        .available;

    session.learn_skill(ALICE, &bash).unwrap();
    session.learn_skill(ALICE, &bash).unwrap();
    session.learn_skill(ALICE, &endurance).unwrap();
    session.assign_hotbar(ALICE, 0, &bash).unwrap();
    let spent = session.character(ALICE).unwrap().progression.skill_points().spent;
    assert_eq!(spent, 3);

    let mut rx = session.subscribe(Topic::Progression);
    let message = session.execute_command(ALICE, "reset-skills").unwrap();
    assert_eq!(message, "Skills reset. Refunded 3 skill points.");

    let character = session.character(ALICE).unwrap();
    assert!(character.skills.instances().all(|instance| instance.rank() == 0));
    assert!(character.skills.hotbar().iter().all(Option::is_none));
    assert_eq!(character.progression.skill_points().spent, 0);
    assert_eq!(character.progression.skill_points().available, before);
    assert!(drain(&mut rx).iter().any(|event| matches!(
        event,
        Event::Progression(ProgressionEvent::SkillsReset {
            character: ALICE,
            refunded: 3
        })
    )));

    assert!(matches!(
        session.reset_skills(DAVE),
        Err(SessionError::UnknownCharacter(DAVE))
    ));
}

#[test]
fn job_and_prerequisite_gates_report_in_order() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    session.set_level(ALICE, 12).unwrap();
    let cleave = session
        .template(&SkillId::from("warrior.cleave"))
        .unwrap()
        .clone();

    let reason = session.character(ALICE).unwrap().cannot_learn_reason(&cleave);
    assert!(matches!(reason, Some(CannotLearnReason::WrongJob { .. })));

    session.set_job(ALICE, Job::Warrior).unwrap();
    let reason = session.character(ALICE).unwrap().cannot_learn_reason(&cleave);
    assert!(matches!(
        reason,
        Some(CannotLearnReason::MissingPrerequisite { min_rank: 3, .. })
    ));

    let bash = SkillId::from("novice.bash");
    for _ in 0..3 {
        session.learn_skill(ALICE, &bash).unwrap();
    }
    assert!(session.character(ALICE).unwrap().can_learn(&cleave));
}

/// Three characters hit the zombie, a fourth only showed up: the three
/// receive the full award each, the fourth nothing.
#[test]
fn every_eligible_contributor_receives_the_full_award() {
    let mut session = session();
    for id in [ALICE, BOB, CAROL, DAVE] {
        session.add_character(id).unwrap();
    }
    let entity = EntityId(100);
    session.spawn(entity, zombie());

    session
        .record_damage(entity, DamageSource::Character(ALICE), 200)
        .unwrap();
    session
        .record_damage(entity, DamageSource::Minion { owner: BOB }, 20)
        .unwrap();
    session
        .record_damage(entity, DamageSource::Projectile { owner: Some(CAROL) }, 5)
        .unwrap();
    session
        .record_damage(entity, DamageSource::Character(DAVE), 0)
        .unwrap();
    session
        .record_damage(entity, DamageSource::Environment, 500)
        .unwrap();

    let report = session.kill(entity).unwrap();

    assert_eq!(report.awards.len(), 3);
    assert!(report.awards.iter().all(|a| a.xp == report.xp.total));
    assert!(report.award(DAVE).is_none());
    assert_eq!(session.character(DAVE).unwrap().progression.xp(), 0);
    for id in [ALICE, BOB, CAROL] {
        let progress = &session.character(id).unwrap().progression;
        assert!(progress.level() > 1 || progress.xp() == report.xp.total);
    }
}

#[test]
fn a_kill_is_rewarded_once() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    let entity = EntityId(1);
    session.spawn(entity, zombie());
    session
        .record_damage(entity, DamageSource::Character(ALICE), 50)
        .unwrap();

    assert!(session.kill(entity).unwrap().rewarded());
    assert!(matches!(
        session.kill(entity),
        Err(SessionError::UnknownEntity(id)) if id == entity
    ));
}

#[test]
fn environment_only_kill_rewards_nobody() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    let entity = EntityId(3);
    session.spawn(entity, zombie());
    session
        .record_damage(entity, DamageSource::Environment, 500)
        .unwrap();

    let report = session.kill(entity).unwrap();
    assert!(!report.rewarded());
    assert_eq!(session.character(ALICE).unwrap().progression.xp(), 0);
}

#[test]
fn damage_older_than_the_window_earns_nothing() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    let entity = EntityId(5);
    session.spawn(entity, zombie());
    session
        .record_damage(entity, DamageSource::Character(ALICE), 100)
        .unwrap();

    let timeout = session.attribution_window().timeout_ticks;
    session.tick(timeout + 1);
    assert!(session.ledger().get(entity).is_none());

    let report = session.kill(entity).unwrap();
    assert!(report.awards.is_empty());
}

#[test]
fn last_interaction_counts_when_nobody_dealt_damage() {
    let mut session = session();
    session.add_character(BOB).unwrap();
    let entity = EntityId(6);
    session.spawn(entity, zombie());
    session.record_interaction(entity, BOB).unwrap();

    let report = session.kill(entity).unwrap();
    assert!(report.award(BOB).is_some());
}

#[test]
fn despawn_discards_attribution() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    let entity = EntityId(9);
    session.spawn(entity, zombie());
    session
        .record_damage(entity, DamageSource::Character(ALICE), 100)
        .unwrap();

    assert!(session.despawn(entity));
    assert!(session.ledger().get(entity).is_none());
    assert!(matches!(
        session.kill(entity),
        Err(SessionError::UnknownEntity(_))
    ));
}

#[test]
fn active_event_multiplies_kill_xp() {
    let mut session = session();
    session.add_character(ALICE).unwrap();

    session.spawn(EntityId(1), zombie());
    session
        .record_damage(EntityId(1), DamageSource::Character(ALICE), 10)
        .unwrap();
    let plain = session.kill(EntityId(1)).unwrap();

    assert!(session.start_event(WorldEvent::SolarEclipse));
    assert!(session.start_event(WorldEvent::BloodMoon));
    session.spawn(EntityId(2), zombie());
    session
        .record_damage(EntityId(2), DamageSource::Character(ALICE), 10)
        .unwrap();
    let boosted = session.kill(EntityId(2)).unwrap();

    assert_eq!(boosted.xp.event, 1.5);
    assert!(boosted.xp.total > plain.xp.total);
    assert!(session.end_event(WorldEvent::SolarEclipse));
    assert!(!session.end_event(WorldEvent::SolarEclipse));
}

/// The first Wall of Flesh kill adds its increments and starts hardmode;
/// killing it again changes nothing.
#[test]
fn boss_increments_apply_once() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    let mut world_events = session.subscribe(Topic::World);

    session.spawn(EntityId(1), wall_of_flesh());
    session
        .record_damage(EntityId(1), DamageSource::Character(ALICE), 8000)
        .unwrap();
    let report = session.kill(EntityId(1)).unwrap();

    assert_eq!(
        report.boss,
        Some(BossKillOutcome::Counted {
            previous_world_level: 0,
            world_level: 5,
            level_cap: 32,
            tier: LevelCapTier::EarlyHardmode,
        })
    );
    assert!(session.world().is_hardmode());
    assert!(drain(&mut world_events).iter().any(|event| matches!(
        event,
        Event::World(WorldStateEvent::WorldLevelChanged { world_level: 5, level_cap: 32, .. })
    )));

    session.spawn(EntityId(2), wall_of_flesh());
    session
        .record_damage(EntityId(2), DamageSource::Character(ALICE), 8000)
        .unwrap();
    let again = session.kill(EntityId(2)).unwrap();

    assert_eq!(again.boss, Some(BossKillOutcome::AlreadyCounted));
    assert_eq!(session.world().world_level(), 5);
    assert_eq!(session.world().level_cap(), 32);
}

#[test]
fn characters_held_at_the_cap_resume_after_a_cap_raise() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    assert_eq!(session.set_level(ALICE, 20).unwrap(), 20);

    let report = session.award_experience(ALICE, 10_000_000).unwrap();
    assert!(!report.leveled_up());
    assert!(report.xp_discarded > 0);
    let progress = &session.character(ALICE).unwrap().progression;
    assert_eq!(progress.xp(), progress.xp_required());

    session.spawn(EntityId(1), wall_of_flesh());
    session
        .record_damage(EntityId(1), DamageSource::Character(ALICE), 100)
        .unwrap();
    session.kill(EntityId(1)).unwrap();

    assert_eq!(session.character(ALICE).unwrap().level(), 21);
}

#[test]
fn unknown_boss_is_a_no_op() {
    let mut session = session();
    session.spawn(
        EntityId(1),
        EntityDescriptor::boss("Thorium Boss", BossId::from("thorium:grand_thunder_bird"), 900, 4),
    );

    let report = session.kill(EntityId(1)).unwrap();
    assert_eq!(report.boss, Some(BossKillOutcome::Unknown));
    assert_eq!(session.world().world_level(), 0);
}

#[test]
fn world_level_never_decreases() {
    let mut session = session();
    assert_eq!(session.set_world_level(10).unwrap(), 10);
    assert!(matches!(
        session.set_world_level(3),
        Err(SessionError::World(_))
    ));
    assert_eq!(session.world().world_level(), 10);

    let unlocked = session.unlock_all_bosses();
    assert_eq!(unlocked, 18);
    let level = session.world().world_level();
    assert!(level >= 10);
    assert_eq!(session.unlock_all_bosses(), 0);
    assert_eq!(session.world().world_level(), level);
    assert_eq!(session.world().tier(), LevelCapTier::Unlimited);
    assert_eq!(
        session.world().level_cap(),
        session.oracles().config().leveling.max_level
    );
}

#[test]
fn skill_use_spends_resources_and_attributes_the_hit() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    session.award_experience(ALICE, 200).unwrap();
    let bash = SkillId::from("novice.bash");
    session.learn_skill(ALICE, &bash).unwrap();
    session.spawn(EntityId(1), zombie());

    assert!(matches!(
        session.use_skill(ALICE, &bash, Some(EntityId(99))),
        Err(SessionError::UnknownEntity(_))
    ));

    let stamina_before = session
        .character(ALICE)
        .unwrap()
        .resources
        .current(ResourceKind::Stamina);
    let used = session.use_skill(ALICE, &bash, Some(EntityId(1))).unwrap();
    let hit = used.hit.expect("bash deals damage");
    assert!(hit.amount >= 1);

    let character = session.character(ALICE).unwrap();
    assert_eq!(
        character.resources.current(ResourceKind::Stamina),
        stamina_before - used.activation.resource_spent
    );
    let map = session.ledger().get(EntityId(1)).unwrap();
    assert_eq!(map.contribution(ALICE).unwrap().damage, hit.amount as u64);

    // still cooling down
    assert!(matches!(
        session.use_skill(ALICE, &bash, Some(EntityId(1))),
        Err(SessionError::CannotUse(_))
    ));
    session.tick(60 * 5);
    assert!(session.use_skill(ALICE, &bash, None).unwrap().hit.is_none());
}

#[test]
fn same_seed_rolls_the_same_damage() {
    let roll = || {
        let mut session = session();
        session.add_character(ALICE).unwrap();
        session.award_experience(ALICE, 200).unwrap();
        let bash = SkillId::from("novice.bash");
        session.learn_skill(ALICE, &bash).unwrap();
        session.spawn(EntityId(1), zombie());
        session
            .use_skill(ALICE, &bash, Some(EntityId(1)))
            .unwrap()
            .hit
            .unwrap()
    };

    assert_eq!(roll(), roll());
}

#[test]
fn level_up_plays_effects_through_the_registry() {
    let effects = Arc::new(RecordingEffects::new());
    let oracles = oracles().with_effects(effects.clone());
    let mut session = Session::new(oracles, SessionConfig::default().with_seed(1));
    session.add_character(ALICE).unwrap();

    session.spawn(EntityId(1), EntityDescriptor::regular("Golem", 5000, 40, 0));
    session
        .record_damage(EntityId(1), DamageSource::Character(ALICE), 10)
        .unwrap();
    let report = session.kill(EntityId(1)).unwrap();
    assert!(report.award(ALICE).unwrap().level_up.leveled_up());

    let played = effects.played();
    assert!(played.iter().any(|p| p.effect == EffectId::from("level_up")
        && p.target == EffectTarget::Character(ALICE)));
}

#[test]
fn commands_drive_debug_edits() {
    let mut session = session();
    session.add_character(ALICE).unwrap();

    let message = session.execute_command(ALICE, "/add-xp 3000").unwrap();
    assert!(message.contains("Reached level"));

    session.execute_command(ALICE, "set-job knight").unwrap();
    assert_eq!(session.character(ALICE).unwrap().progression.job(), Job::Knight);

    session.execute_command(ALICE, "add-skill-points 4").unwrap();
    session.execute_command(ALICE, "set-world-level 3").unwrap();
    assert_eq!(session.world().world_level(), 3);
    assert!(matches!(
        session.execute_command(ALICE, "set-world-level 1"),
        Err(CommandError::Session(SessionError::World(_)))
    ));

    assert!(matches!(
        session.execute_command(ALICE, "set-level 0"),
        Err(CommandError::InvalidArgument { .. })
    ));
    assert!(matches!(
        session.execute_command(ALICE, "fly"),
        Err(CommandError::UnknownCommand(_))
    ));
    assert!(matches!(
        session.execute_command(CharacterId(42), "add-xp 5"),
        Err(CommandError::Session(SessionError::UnknownCharacter(_)))
    ));

    session.execute_command(ALICE, "reset-character").unwrap();
    let character = session.character(ALICE).unwrap();
    assert_eq!(character.level(), 1);
    assert_eq!(character.progression.job(), Job::Novice);
}
