//! Validate a content directory.
//!
//! Loading already checks stat references, hook lists and trait names. On top
//! of that every tool is rebuilt once with its traits alone, which catches
//! traits that conflict with each other (two owners of a single-owner hook) or
//! exceed the configured limits.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;
use tool_core::{PartStatsBySlot, ToolInput};

use super::load_content;

/// Load content and check every definition
#[derive(Parser)]
pub struct Validate {
    /// List every modifier with its modules
    #[arg(short, long)]
    verbose: bool,
}

impl Validate {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let content = load_content(data_dir)?;
        let env = content.env();

        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            data_dir.display()
        );
        println!("  Materials: {}", env.materials().len());
        println!("  Modifiers: {}", env.modifiers().len());
        println!("  Tools:     {}", content.tools().count());
        println!();

        if self.verbose {
            println!("{}", style("Modifiers:").bold().yellow());
            for modifier in env.modifiers().iter() {
                println!(
                    "  {} (priority {})",
                    style(modifier.id()).cyan(),
                    modifier.priority()
                );
                for entry in modifier.modules() {
                    let hooks: Vec<String> =
                        entry.hooks().iter().map(ToString::to_string).collect();
                    println!("    {} -> {}", entry.module.name(), hooks.join(", "));
                }
            }
            println!();
        }

        let mut failures = 0;
        for tool in content.tools() {
            let input = ToolInput::with_parts(tool, PartStatsBySlot::new(), &[]);
            match env.rebuild(&input) {
                Ok(_) => println!("  {} {}", style("✓").green(), tool.id),
                Err(err) => {
                    failures += 1;
                    println!("  {} {}: {}", style("✗").red().bold(), tool.id, err);
                }
            }
        }

        if failures > 0 {
            anyhow::bail!("{} tool(s) failed to rebuild", failures);
        }
        Ok(())
    }
}
