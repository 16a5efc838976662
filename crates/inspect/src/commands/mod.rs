//! Command implementations for tool-inspect
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod hooks;
mod rebuild;
mod validate;

pub use hooks::Hooks;
pub use rebuild::Rebuild;
pub use validate::Validate;

use std::path::Path;

use anyhow::{Context, Result};
use tool_content::{Content, ContentFactory};

/// Output format shared by commands that print a result.
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable view
    Summary,
    /// Full JSON output
    Json,
}

pub(crate) fn load_content(data_dir: &Path) -> Result<Content> {
    ContentFactory::new(data_dir)
        .build()
        .with_context(|| format!("Failed to load content from {}", data_dir.display()))
}
