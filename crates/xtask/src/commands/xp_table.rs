//! Print the XP curve for balance review

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use progression_content::{ConfigLoader, embedded};
use progression_core::xp_required_for_level;

/// Print XP required per level
#[derive(Parser)]
pub struct XpTable {
    /// First level to print
    #[arg(long, default_value_t = 1)]
    from: u32,

    /// Last level to print (defaults to the base level cap)
    #[arg(long)]
    to: Option<u32>,

    /// Print every Nth level
    #[arg(long, default_value_t = 1)]
    step: u32,

    /// Balance file to read instead of the shipped config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl XpTable {
    pub fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => embedded::config().context("Shipped config is invalid")?,
        };
        let leveling = &config.leveling;
        let from = self.from.max(1);
        let to = self
            .to
            .unwrap_or(leveling.base_level_cap)
            .min(leveling.max_level);
        if from > to {
            anyhow::bail!("--from {} is above --to {}", from, to);
        }

        println!(
            "{}",
            style(format!(
                "required(level) = {} * level^{} + {} * level",
                leveling.xp_base, leveling.xp_exponent, leveling.xp_linear
            ))
            .dim()
        );
        println!(
            "{:>6}  {:>14}  {:>16}",
            style("Level").bold(),
            style("Required").bold(),
            style("Total to reach").bold()
        );

        // XP needed from level 1 to reach `level`.
        let mut total: u64 = (1..from)
            .map(|level| xp_required_for_level(level, leveling))
            .sum();
        for level in from..=to {
            let required = xp_required_for_level(level, leveling);
            if (level - from) % self.step.max(1) == 0 {
                println!("{:>6}  {:>14}  {:>16}", level, required, total);
            }
            total = total.saturating_add(required);
        }
        Ok(())
    }
}
