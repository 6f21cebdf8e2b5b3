//! Clean save data command
//!
//! Deletes character and world saves from the save directory.
//!
//! Safety: Always prompts for confirmation before deletion.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crate::dirs;

/// Clean save data
#[derive(Parser, Debug)]
pub struct Clean {
    /// Delete only this world's save (character saves are kept)
    #[arg(long, value_name = "NAME")]
    pub world: Option<String>,

    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let dir = self.dir.clone().unwrap_or_else(dirs::saves_dir);
        if !dir.exists() {
            println!(
                "{}",
                style("Nothing to clean - save directory doesn't exist yet").dim()
            );
            return Ok(());
        }

        let targets: Vec<PathBuf> = match &self.world {
            Some(name) => {
                let save = dir.join(format!("world_{}.bin", name));
                [save.clone(), save.with_extension("bin.sha256")]
                    .into_iter()
                    .filter(|path| path.exists())
                    .collect()
            }
            None => vec![dir.clone()],
        };

        if targets.is_empty() {
            println!("{}", style("Nothing to clean").dim());
            return Ok(());
        }

        println!("{}", style("Clean Progression Saves").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for path in &targets {
            println!("  {} {}", style("→").cyan(), style(path.display()).dim());
        }
        println!();

        if !self.yes && !self.confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for path in targets {
            print!("Deleting {}... ", path.display());
            io::stdout().flush()?;

            if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            }
            .with_context(|| format!("Failed to delete: {}", path.display()))?;

            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }

    /// Prompt user for confirmation
    fn confirm(&self) -> Result<bool> {
        print!("{} ", style("Proceed? [y/N]").yellow().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }
}
