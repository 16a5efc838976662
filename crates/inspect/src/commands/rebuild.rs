//! Rebuild one tool from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde_json::json;
use tool_core::hooks::InteractionResult;
use tool_core::{Identifier, ModifierEntry, ToolStack};

use super::{OutputFormat, load_content};

/// Rebuild one tool and print its stats and hooks
#[derive(Parser)]
pub struct Rebuild {
    /// Tool definition id (e.g., tool:pickaxe)
    #[arg(short, long, value_name = "ID")]
    tool: Identifier,

    /// Material for the next part, in part order (repeatable)
    #[arg(short, long = "material", value_name = "ID")]
    materials: Vec<Identifier>,

    /// Modifier as `id@level`; the level defaults to 1 (repeatable)
    #[arg(short = 'M', long = "modifier", value_name = "ID[@LEVEL]")]
    modifiers: Vec<ModifierEntry>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Rebuild {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let content = load_content(data_dir)?;

        let mut stack = content
            .stack(&self.tool, self.materials.clone())
            .with_context(|| format!("Unknown tool: {}", self.tool))?
            .with_context(|| format!("Failed to build {}", self.tool))?;
        stack
            .set_modifiers(self.modifiers.clone())
            .with_context(|| format!("Failed to apply modifiers to {}", self.tool))?;

        match self.format {
            OutputFormat::Summary => print_summary(&stack),
            OutputFormat::Json => print_json(&stack)?,
        }

        Ok(())
    }
}

fn print_summary(stack: &ToolStack) {
    let build = stack.build();

    println!("{} {}", style("Tool:").bold().cyan(), stack.definition().id);
    let materials: Vec<String> = stack.materials().iter().map(ToString::to_string).collect();
    println!("{} {}", style("Materials:").bold().cyan(), materials.join(", "));
    println!();

    println!("{}", style("Modifiers:").bold().yellow());
    if build.modifiers.is_empty() {
        println!("  (none)");
    }
    for entry in &build.modifiers {
        println!("  {} level {}", entry.id, entry.level);
    }
    println!();

    println!("{}", style("Stats:").bold().yellow());
    for (id, value) in build.stats.iter() {
        println!("  {:<24} {}", id.to_string(), value);
    }
    println!();

    if !build.volatile.is_empty() {
        println!("{}", style("Volatile:").bold().yellow());
        for flag in build.volatile.flags() {
            println!("  flag {}", flag);
        }
        for (key, value) in build.volatile.ints() {
            println!("  {:<24} {}", key.to_string(), value);
        }
        println!();
    }

    println!("{}", style("Hooks:").bold().yellow());
    if build.hooks.is_empty() {
        println!("  (none)");
    }
    for id in build.hooks.hook_ids() {
        println!("  {}", style(id).cyan());
        for contributor in build.hooks.contributors(id) {
            println!("    {}", contributor);
        }
    }
    println!();

    println!("{}", style("Derived:").bold().yellow());
    println!("  Harvest tier: {}", stack.harvest_tier());
    println!("  Durability:   {}", stack.max_durability());
    println!("  Capacity:     {}", stack.capacity());
    match stack.interact() {
        InteractionResult::Pass => println!("  Interaction:  pass"),
        InteractionResult::Perform(action) => println!("  Interaction:  {}", action),
    }
}

fn print_json(stack: &ToolStack) -> Result<()> {
    let build = stack.build();

    let hooks: serde_json::Map<String, serde_json::Value> = build
        .hooks
        .hook_ids()
        .into_iter()
        .map(|id| {
            let contributors: Vec<String> = build
                .hooks
                .contributors(id)
                .iter()
                .map(ToString::to_string)
                .collect();
            (id.to_string(), json!(contributors))
        })
        .collect();

    let interaction = match stack.interact() {
        InteractionResult::Pass => None,
        InteractionResult::Perform(action) => Some(action.to_string()),
    };

    let output = json!({
        "tool": stack.definition().id.to_string(),
        "materials": stack.materials(),
        "modifiers": build.modifiers,
        "stats": &*build.stats,
        "volatile": &*build.volatile,
        "hooks": hooks,
        "derived": {
            "harvest_tier": stack.harvest_tier(),
            "max_durability": stack.max_durability(),
            "capacity": stack.capacity(),
            "interaction": interaction,
        },
    });

    let json =
        serde_json::to_string_pretty(&output).context("Failed to serialize build to JSON")?;
    println!("{}", json);
    Ok(())
}
