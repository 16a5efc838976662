//! Data-driven tool content and loaders.
//!
//! This crate turns a data directory into a ready [`ToolEnv`](tool_core::ToolEnv):
//! - Tool configuration (TOML)
//! - Material part stats (RON)
//! - Modifier definitions built from the stock modules (RON)
//! - Tool definitions with base stats and traits (RON)
//!
//! Loaders resolve every stat and hook reference against the registries they
//! populate, so a loaded [`Content`] never holds dangling ids.

pub mod content;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::Content;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, MaterialLoader, ModifierLoader, ModifierSpec, ModuleKindSpec,
    ModuleSpec, StatBoostSpec, ToolLoader, ToolSpec,
};
