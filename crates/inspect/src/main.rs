//! Inspection utilities for tool content.
//!
//! Loads a content directory and reports what the rebuild pipeline does with it.
//! Run with: `cargo run -p tool-inspect -- <command>`

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Hooks, Rebuild, Validate};

/// Inspect tool content and rebuild results
#[derive(Parser)]
#[command(name = "tool-inspect")]
#[command(about = "Inspection tools for modifiable tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (config.toml, materials.ron, modifiers.ron, tools.ron)
    #[arg(
        short,
        long,
        value_name = "DIR",
        global = true,
        default_value = "crates/tool/content/data"
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load content and check every definition
    Validate(Validate),

    /// Rebuild one tool and print its stats and hooks
    Rebuild(Rebuild),

    /// List registered hooks and their merge strategies
    Hooks(Hooks),
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
        Command::Validate(cmd) => cmd.execute(&cli.data_dir),
        Command::Rebuild(cmd) => cmd.execute(&cli.data_dir),
        Command::Hooks(cmd) => cmd.execute(&cli.data_dir),
    }
}
