//! Capability dispatch and stat aggregation for modifiable tools.
//!
//! `tool-core` lets independently authored modifier modules contribute
//! behavior ("hooks") and numbers ("stats") to a tool without knowing about
//! each other. Every rebuild is a pure function of its inputs:
//!
//! ```text
//! [ ModifierEntry list ] ─┬─> ModifierHookMapBuilder ──> ModifierHookMap (frozen)
//!                         │
//! [ PartStatsBySlot ] ────┴─> StatsBuilder ────────────> StatsSnapshot   (frozen)
//! ```
//!
//! - [`hooks`] holds typed hook tokens, the append-only registry, merge
//!   strategies and the per-build hook map
//! - [`stats`] holds stat descriptors, the aggregation builder, snapshots and
//!   multi-part averaging
//! - [`modifier`] holds modifier definitions, entries and the built-in modules
//! - [`leveling`] turns integer levels into scaled values
//! - [`tool`] is the rebuild entry point and the host-side tool view
//!
//! Registries are explicit values bundled in [`ToolEnv`]; nothing here is a
//! process-wide static.
pub mod config;
pub mod env;
pub mod error;
pub mod hooks;
pub mod id;
pub mod leveling;
pub mod modifier;
pub mod stats;
pub mod tool;

pub use config::ToolConfig;
pub use env::{EnvError, ToolEnv};
pub use error::{ErrorSeverity, ToolError};
pub use hooks::{
    Contributor, HookError, HookObject, HookRegistry, HookToken, MergeStrategy, ModifierHookMap,
    ModifierHookMapBuilder, ModifierHooks,
};
pub use id::{Identifier, IdentifierError};
pub use leveling::{EffectLevel, LevelingValue, RandomLevelingValue};
pub use modifier::{
    MaterialId, Modifier, ModifierEntry, ModifierError, ModifierId, ModifierModule,
    ModifierRegistry,
};
pub use stats::{
    MaterialRegistry, MaterialStats, PartSlot, PartStatsBySlot, StatDescriptor, StatError,
    StatKind, StatRegistry, StatValue, StatsBuilder, StatsSnapshot, ToolStats,
};
pub use tool::{
    RebuildError, ToolBuild, ToolDefinition, ToolId, ToolInput, ToolRebuildContext, ToolRebuilder,
    ToolStack, ToolView, VolatileData,
};
