//! Modifiers, their modules and the entries that apply them to tools.

mod definition;
mod entry;
mod module;
pub mod modules;
mod registry;

pub use definition::{Modifier, ModuleEntry};
pub use entry::{ModifierEntry, ModifierEntryParseError, merge_entries};
pub use module::{BoundModule, ModifierModule};
pub use registry::ModifierRegistry;

use crate::error::{ErrorSeverity, ToolError};
use crate::hooks::HookError;
use crate::id::Identifier;

pub type ModifierId = Identifier;
pub type MaterialId = Identifier;

/// Errors raised while registering or resolving modifiers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error("modifier '{modifier}' is already registered")]
    DuplicateModifier { modifier: ModifierId },

    #[error("modifier '{modifier}' is not registered")]
    UnknownModifier { modifier: ModifierId },

    #[error("modifier '{modifier}' has invalid hooks: {source}")]
    InvalidHooks {
        modifier: ModifierId,
        #[source]
        source: HookError,
    },
}

impl ToolError for ModifierError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateModifier { .. } => "duplicate_modifier",
            Self::UnknownModifier { .. } => "unknown_modifier",
            Self::InvalidHooks { source, .. } => source.error_code(),
        }
    }
}
