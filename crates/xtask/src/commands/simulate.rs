//! Play a scripted boss progression through a real session
//!
//! A party kills every registered boss in level order while the table shows
//! how world level, level cap and party level evolve. Useful for checking a
//! balance change end to end. Set `RUST_LOG=debug` to see the session logs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use progression_content::{ContentFactory, embedded};
use progression_core::{BossOracle, CharacterId, DamageSource, EntityDescriptor, EntityId};
use progression_runtime::{
    FileCharacterRepository, FileWorldRepository, OracleManager, Session, SessionConfig,
};

/// Simulate a boss progression run
#[derive(Parser)]
pub struct Simulate {
    /// Party size
    #[arg(short, long, default_value_t = 3)]
    party: u32,

    /// Regular kills between bosses
    #[arg(long, default_value_t = 20)]
    grind: u32,

    /// Game seed for damage rolls
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Content directory (defaults to the shipped content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write the resulting saves to this directory
    #[arg(long, value_name = "DIR")]
    save_to: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let content = match &self.data_dir {
            Some(dir) => ContentFactory::new(dir).load()?,
            None => embedded::content()?,
        };
        let mut session = Session::new(
            OracleManager::from_content(content),
            SessionConfig::default().with_seed(self.seed),
        );

        let party: Vec<CharacterId> = (1..=self.party.max(1)).map(CharacterId).collect();
        for id in &party {
            session.add_character(*id)?;
        }

        let mut bosses: Vec<_> = session
            .oracles()
            .bosses()
            .boss_ids()
            .into_iter()
            .filter_map(|id| session.oracles().bosses().boss(&id).cloned())
            .collect();
        bosses.sort_by_key(|boss| boss.level);

        println!(
            "{:<20} {:>8} {:>6} {:>6} {:<14} {:>9}",
            style("Boss").bold(),
            style("Kill XP").bold(),
            style("World").bold(),
            style("Cap").bold(),
            style("Tier").bold(),
            style("Party Lv").bold()
        );

        let mut next_entity = 0u32;
        for boss in &bosses {
            for _ in 0..self.grind {
                next_entity += 1;
                let level = session.world().world_level();
                let descriptor = EntityDescriptor::regular("Grunt", 200 + level * 40, 5, level);
                fight(&mut session, EntityId(next_entity), descriptor, &party)?;
            }

            next_entity += 1;
            let mut descriptor = EntityDescriptor::boss(
                boss.display_name.clone(),
                boss.id.clone(),
                2000 + boss.level * 300,
                boss.level,
            );
            if session.world().is_hardmode() {
                descriptor = descriptor.hardmode();
            }
            let report = fight(&mut session, EntityId(next_entity), descriptor, &party)?;

            let world = session.world();
            let party_level = party
                .iter()
                .filter_map(|id| session.character(*id).ok())
                .map(|c| c.level())
                .sum::<u32>() as f64
                / party.len() as f64;
            println!(
                "{:<20} {:>8} {:>6} {:>6} {:<14} {:>9.1}",
                boss.display_name,
                report.xp.total,
                world.world_level(),
                world.level_cap(),
                world.tier().to_string(),
                party_level
            );
        }

        if let Some(dir) = &self.save_to {
            let characters = FileCharacterRepository::new(dir)
                .with_context(|| format!("Failed to open {}", dir.display()))?;
            let worlds = FileWorldRepository::new(dir)?;
            for id in &party {
                session.save_character(*id, &characters)?;
            }
            session.save_world(&worlds)?;
            println!();
            println!(
                "{} {}",
                style("Saves written to").green(),
                dir.display()
            );
        }
        Ok(())
    }
}

/// Every party member lands a hit, then the entity dies.
fn fight(
    session: &mut Session,
    entity: EntityId,
    descriptor: EntityDescriptor,
    party: &[CharacterId],
) -> Result<progression_runtime::KillReport> {
    let share = (descriptor.max_life / party.len().max(1) as u32).max(1);
    session.spawn(entity, descriptor);
    for id in party {
        session.record_damage(entity, DamageSource::Character(*id), share)?;
    }
    session.tick(30);
    Ok(session.kill(entity)?)
}
