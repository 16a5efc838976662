//! Stat descriptors, aggregation and frozen snapshots.
//!
//! ```text
//! StatRegistry ──> StatDescriptor<T>
//!       │
//!       └──> StatsBuilder ── add / multiply / set ──> StatsSnapshot
//!                 ▲
//!   PartStatsBySlot (per-slot means)
//! ```

mod builder;
mod descriptor;
mod error;
mod parts;
mod registry;
mod snapshot;
mod tool_stats;
mod value;

pub use builder::StatsBuilder;
pub use descriptor::{StatDefinition, StatDescriptor, StatRange};
pub use error::StatError;
pub use parts::{
    ExtraStats, HandleStats, HeadStats, MaterialRegistry, MaterialStats, PartSlot, PartStatsBySlot,
};
pub use registry::StatRegistry;
pub use snapshot::StatsSnapshot;
pub use tool_stats::ToolStats;
pub use value::{StatKind, StatType, StatValue};
