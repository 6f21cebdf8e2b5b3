//! Development tasks for the progression workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadSave, Simulate, ValidateContent, XpTable};

/// Development tasks for the progression workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for progression content and saves", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate skill, boss and balance content
    ValidateContent(ValidateContent),

    /// Print XP required per level
    XpTable(XpTable),

    /// Read and inspect character or world saves
    ReadSave(ReadSave),

    /// Simulate a boss progression run
    Simulate(Simulate),

    /// Clean save data
    Clean(Clean),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ValidateContent(cmd) => cmd.execute(),
        Command::XpTable(cmd) => cmd.execute(),
        Command::ReadSave(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
