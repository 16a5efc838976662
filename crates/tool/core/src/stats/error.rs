use crate::error::{ErrorSeverity, ToolError};
use crate::id::Identifier;

use super::value::StatKind;

/// Errors raised while registering or resolving stats and materials.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatError {
    #[error("stat '{stat}' is already registered")]
    DuplicateStat { stat: Identifier },

    #[error("stat '{stat}' is not registered")]
    UnknownStat { stat: Identifier },

    #[error("stat '{stat}' has invalid range [{min}, {max}] for default {default}")]
    InvalidRange {
        stat: Identifier,
        min: f32,
        max: f32,
        default: f32,
    },

    #[error("material '{material}' is already registered")]
    DuplicateMaterial { material: Identifier },

    #[error("stat '{stat}' is {actual}, not {expected}")]
    KindMismatch {
        stat: Identifier,
        expected: StatKind,
        actual: StatKind,
    },
}

impl ToolError for StatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateStat { .. } => "duplicate_stat",
            Self::UnknownStat { .. } => "unknown_stat",
            Self::InvalidRange { .. } => "invalid_range",
            Self::DuplicateMaterial { .. } => "duplicate_material",
            Self::KindMismatch { .. } => "kind_mismatch",
        }
    }
}
