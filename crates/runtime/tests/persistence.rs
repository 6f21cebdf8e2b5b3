use std::fs;
use std::sync::Arc;

use progression_content::embedded;
use progression_core::{
    BossId, BossOracle, Character, CharacterId, CharacterSave, DamageSource, EntityDescriptor,
    EntityId, LevelCapTier, SkillId, StaticBossTable, WorldProgressionState,
};
use progression_runtime::{
    CharacterRepository, FileCharacterRepository, FileWorldRepository, InMemoryCharacterRepo,
    InMemoryWorldRepo, OracleManager, RepositoryError, Session, SessionConfig, SessionError,
    WorldRepository,
};

const ALICE: CharacterId = CharacterId(1);

fn session() -> Session {
    let content = embedded::content().expect("shipped content should load");
    Session::new(
        OracleManager::from_content(content),
        SessionConfig::default().with_seed(11),
    )
}

/// Level 6 with a few learned skills and a bound hotbar.
fn seasoned(session: &mut Session) {
    session.add_character(ALICE).unwrap();
    session.award_experience(ALICE, 5000).unwrap();
    let bash = SkillId::from("novice.bash");
    session.learn_skill(ALICE, &bash).unwrap();
    session.learn_skill(ALICE, &bash).unwrap();
    session
        .learn_skill(ALICE, &SkillId::from("novice.endurance"))
        .unwrap();
    session.assign_hotbar(ALICE, 0, &bash).unwrap();
}

fn kill_boss(session: &mut Session, entity: u32, boss: &str) {
    let entity = EntityId(entity);
    session.spawn(
        entity,
        EntityDescriptor::boss(boss, BossId::from(boss), 3000, 10),
    );
    session
        .record_damage(entity, DamageSource::Character(ALICE), 3000)
        .unwrap();
    session.kill(entity).unwrap();
}

#[test]
fn character_save_round_trip_preserves_rules_outcomes() {
    let mut session = session();
    seasoned(&mut session);
    let original = session.character(ALICE).unwrap();

    let bytes = bincode::serialize(&original.to_save()).unwrap();
    let decoded: CharacterSave = bincode::deserialize(&bytes).unwrap();
    let restored = Character::from_save(decoded, session.oracles().skills());

    assert_eq!(restored.to_save(), original.to_save());
    assert_eq!(restored.derived(), original.derived());
    assert_eq!(
        restored.progression.xp_required(),
        original.progression.xp_required()
    );
    for template in session.oracles().skills().templates() {
        assert_eq!(
            restored.can_learn(template),
            original.can_learn(template),
            "can_learn differs for {}",
            template.id
        );
        assert_eq!(
            restored.can_use(template),
            original.can_use(template),
            "can_use differs for {}",
            template.id
        );
    }
}

#[test]
fn world_save_round_trip_rederives_the_same_state() {
    let mut session = session();
    session.add_character(ALICE).unwrap();
    kill_boss(&mut session, 1, "vanilla:king_slime");
    kill_boss(&mut session, 2, "vanilla:wall_of_flesh");

    let bytes = bincode::serialize(session.world()).unwrap();
    let decoded: WorldProgressionState = bincode::deserialize(&bytes).unwrap();
    assert_eq!(&decoded, session.world());

    let mut replayed = decoded.clone();
    replayed.recalculate_world_level(session.oracles().bosses(), session.oracles().config());
    assert_eq!(&replayed, session.world());
}

#[test]
fn world_level_survives_removed_boss_content() {
    let worlds = InMemoryWorldRepo::new();
    let wof = BossId::from("vanilla:wall_of_flesh");

    let mut first = session();
    first.add_character(ALICE).unwrap();
    kill_boss(&mut first, 1, "vanilla:wall_of_flesh");
    first.save_world(&worlds).unwrap();
    assert_eq!(first.world().world_level(), 5);
    assert_eq!(first.world().level_cap(), 32);

    let content = embedded::content().unwrap();
    let remaining = StaticBossTable::new(
        content
            .bosses
            .boss_ids()
            .iter()
            .filter(|id| **id != wof)
            .filter_map(|id| content.bosses.boss(id).cloned()),
    );
    let mut second = Session::new(
        OracleManager::new(content.config, Arc::new(content.skills), Arc::new(remaining)),
        SessionConfig::default(),
    );
    assert!(second.load_world(&worlds).unwrap());

    let world = second.world();
    assert_eq!(world.world_level(), 5);
    assert_eq!(world.level_cap(), 32);
    assert!(world.is_hardmode());
    assert_eq!(world.tier(), LevelCapTier::EarlyHardmode);
    assert!(world.is_counted(&wof));
}

#[test]
fn memory_repositories_restore_a_session() {
    let characters = InMemoryCharacterRepo::new();
    let worlds = InMemoryWorldRepo::new();

    let mut first = session();
    seasoned(&mut first);
    kill_boss(&mut first, 1, "vanilla:eye_of_cthulhu");
    first.save_character(ALICE, &characters).unwrap();
    first.save_world(&worlds).unwrap();

    let mut second = session();
    assert!(second.load_world(&worlds).unwrap());
    assert!(second.load_character(ALICE, &characters).unwrap());

    assert_eq!(second.world(), first.world());
    assert_eq!(
        second.character(ALICE).unwrap().to_save(),
        first.character(ALICE).unwrap().to_save()
    );
    assert!(!second.load_character(CharacterId(9), &characters).unwrap());
}

#[test]
fn file_repositories_verify_their_digest() {
    let dir = tempfile::tempdir().unwrap();
    let characters = FileCharacterRepository::new(dir.path()).unwrap();
    let worlds = FileWorldRepository::new(dir.path()).unwrap();

    let mut first = session();
    seasoned(&mut first);
    first.save_character(ALICE, &characters).unwrap();
    first.save_world(&worlds).unwrap();
    assert!(characters.exists(ALICE));
    assert_eq!(characters.list_ids().unwrap(), vec![ALICE]);

    let mut second = session();
    assert!(second.load_character(ALICE, &characters).unwrap());
    assert!(second.load_world(&worlds).unwrap());
    assert_eq!(second.character(ALICE).unwrap().level(), 6);

    let path = characters.save_path(ALICE);
    let mut bytes = fs::read(&path).unwrap();
    bytes[0] ^= 0xff;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        second.load_character(ALICE, &characters),
        Err(SessionError::Repository(RepositoryError::DigestMismatch { .. }))
    ));

    characters.delete(ALICE).unwrap();
    assert!(!characters.exists(ALICE));
    assert!(worlds.exists("world"));
}

#[test]
fn world_names_cannot_escape_the_save_dir() {
    let dir = tempfile::tempdir().unwrap();
    let worlds = FileWorldRepository::new(dir.path()).unwrap();
    let state = WorldProgressionState::new(&Default::default());

    assert!(matches!(
        worlds.save("../elsewhere", &state),
        Err(RepositoryError::InvalidName(_))
    ));
    assert!(worlds.save("my-world_2", &state).is_ok());
    assert_eq!(worlds.load("my-world_2").unwrap(), Some(state));
}
