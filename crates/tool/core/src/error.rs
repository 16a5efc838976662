//! Common error infrastructure for tool-core.
//!
//! Domain errors (`HookError`, `StatError`, `RebuildError`, ...) live next to
//! the code that raises them. This module only provides the shared
//! classification used by hosts to decide how loudly to fail.
//!
//! # Design Principles
//!
//! - **Configuration errors fail loudly**: a malformed modifier pack is
//!   rejected at content load, never resolved by dropping a contributor
//! - **Empty cases are not errors**: missing implementors and empty part slots
//!   resolve to defaults
//! - **Rich Context**: errors name the hook, stat or modifier involved

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// Content or registration is malformed and must be fixed by its author.
    ///
    /// Examples: duplicate hook identity, two modules owning an exclusive hook
    Configuration,

    /// The input handed to a rebuild is out of bounds; the previous build
    /// stays valid.
    ///
    /// Examples: too many modifiers, level above the configured maximum
    Validation,

    /// Unexpected state inconsistency inside the engine.
    ///
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns true if the error must surface during content validation.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tool-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to act, not by impact
pub trait ToolError: std::error::Error {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
