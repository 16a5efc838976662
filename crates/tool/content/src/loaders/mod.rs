//! Content loaders for reading tool data from files.
//!
//! Each loader parses one file into `tool-core` types. Files reference stats,
//! hooks and modifiers by id; loaders resolve those ids against the registry
//! they are given and fail on anything unknown.

pub mod config;
pub mod factory;
pub mod materials;
pub mod modifiers;
pub mod tools;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use materials::MaterialLoader;
pub use modifiers::{ModifierLoader, ModifierSpec, ModuleKindSpec, ModuleSpec, StatBoostSpec};
pub use tools::{ToolLoader, ToolSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
