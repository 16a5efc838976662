//! Tool definitions, the rebuild entry point and the host-side tool view.

mod context;
mod definition;
mod rebuild;
mod stack;
mod volatile;

pub use context::{ToolRebuildContext, ToolView};
pub use definition::{ToolDefinition, ToolId};
pub use rebuild::{RebuildError, ToolBuild, ToolInput, ToolRebuilder};
pub use stack::ToolStack;
pub use volatile::VolatileData;
