//! List registered hooks.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde_json::json;

use super::{OutputFormat, load_content};

/// List registered hooks and their merge strategies
#[derive(Parser)]
pub struct Hooks {
    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Hooks {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let content = load_content(data_dir)?;
        let hooks = content.env().hooks();

        match self.format {
            OutputFormat::Summary => {
                println!("{}", style("=== Registered Hooks ===").bold().green());
                println!();
                for hook in hooks.iter() {
                    let id = format!("{:<24}", hook.id().to_string());
                    println!(
                        "  {} {:<10} {}",
                        style(id).cyan(),
                        hook.strategy().as_ref(),
                        style(hook.contract()).dim()
                    );
                }
                println!();
                println!("  {} hooks", hooks.len());
            }
            OutputFormat::Json => {
                let list: Vec<_> = hooks
                    .iter()
                    .map(|hook| {
                        json!({
                            "id": hook.id().to_string(),
                            "strategy": hook.strategy().as_ref(),
                            "contract": hook.contract(),
                        })
                    })
                    .collect();
                let json = serde_json::to_string_pretty(&list)
                    .context("Failed to serialize hooks to JSON")?;
                println!("{}", json);
            }
        }

        Ok(())
    }
}
