//! Validate content files and print what they register
//!
//! Runs the same loaders the game uses, so every error reported here would
//! also stop the game from starting.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use progression_content::{ContentFactory, GameContent, embedded};
use progression_core::{BossOracle, SkillOracle};

/// Validate skill, boss and balance content
#[derive(Parser)]
pub struct ValidateContent {
    /// Content directory containing config.toml, bosses.ron and skills/
    /// (defaults to the content shipped with the binary)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

impl ValidateContent {
    pub fn execute(self) -> Result<()> {
        let (origin, content) = match &self.data_dir {
            Some(dir) => (
                dir.display().to_string(),
                ContentFactory::new(dir)
                    .load()
                    .with_context(|| format!("Content in {} is invalid", dir.display()))?,
            ),
            None => (
                "embedded".to_owned(),
                embedded::content().context("Shipped content is invalid")?,
            ),
        };

        if !self.quiet {
            print_report(&origin, &content);
        }
        println!("{}", style("✓ Content is valid").green().bold());
        Ok(())
    }
}

fn print_report(origin: &str, content: &GameContent) {
    println!("{} {}", style("Content:").bold().cyan(), origin);
    println!();

    let templates = content.skills.templates();
    let mut by_job: BTreeMap<String, usize> = BTreeMap::new();
    for template in &templates {
        let job = template
            .required_job
            .map_or_else(|| "any".to_owned(), |job| job.to_string());
        *by_job.entry(job).or_default() += 1;
    }

    println!(
        "{} {}",
        style("Skills:").bold().yellow(),
        templates.len()
    );
    for (job, count) in &by_job {
        println!("  {:<12} {}", job, count);
    }
    println!();

    println!("{} {}", style("Bosses:").bold().yellow(), content.bosses.len());
    let mut bosses: Vec<_> = content
        .bosses
        .boss_ids()
        .into_iter()
        .filter_map(|id| content.bosses.boss(&id).cloned())
        .collect();
    bosses.sort_by_key(|boss| boss.level);

    let mut world_level = 0u32;
    let mut cap_bonus = 0u32;
    for boss in &bosses {
        world_level += boss.world_level;
        cap_bonus += boss.level_cap;
        let marker = if boss.starts_hardmode {
            style(" hardmode").magenta().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<20} lv {:>3}  +{:<2} world  +{:<2} cap{}",
            boss.display_name, boss.level, boss.world_level, boss.level_cap, marker
        );
    }
    println!();

    let leveling = &content.config.leveling;
    println!("{}", style("Totals:").bold().yellow());
    println!("  World level with every boss: {}", world_level);
    println!(
        "  Level cap with every boss: {} (max {})",
        (leveling.base_level_cap + cap_bonus).min(leveling.max_level),
        leveling.max_level
    );
    println!(
        "  Unlimited tier from world level: {}",
        content.config.world.unlimited_level
    );
    println!();
}
