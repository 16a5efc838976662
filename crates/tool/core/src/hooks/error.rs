//! Error types for hook registration and hook map construction.

use crate::error::{ErrorSeverity, ToolError};
use crate::id::Identifier;

/// Errors raised while registering hooks or building a hook map.
///
/// All variants are configuration errors: they indicate malformed content or
/// startup code and fail the rebuild instead of dropping a contributor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("hook '{hook}' is already registered")]
    DuplicateToken { hook: Identifier },

    #[error("hook '{hook}' is not registered")]
    UnknownHook { hook: Identifier },

    #[error("'{object}' does not implement {contract} required by hook '{hook}'")]
    InvalidModuleForHook {
        object: String,
        hook: Identifier,
        contract: &'static str,
    },

    #[error(
        "hook '{hook}' cannot be merged but is claimed by {}",
        contributors.join(", ")
    )]
    AmbiguousHook {
        hook: Identifier,
        contributors: Vec<String>,
    },
}

impl ToolError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateToken { .. } => "duplicate_token",
            Self::UnknownHook { .. } => "unknown_hook",
            Self::InvalidModuleForHook { .. } => "invalid_module_for_hook",
            Self::AmbiguousHook { .. } => "ambiguous_hook",
        }
    }
}
