//! Stat definitions and typed descriptors.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::value::{StatKind, StatType, StatValue};
use crate::id::Identifier;

/// Inclusive clamp range for numeric stats.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRange {
    pub min: f32,
    pub max: f32,
}

impl StatRange {
    pub const UNBOUNDED: Self = Self {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if `min <= max` and neither bound is NaN.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into the range. NaN resolves to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Everything the registry knows about one stat.
#[derive(Clone, Debug, PartialEq)]
pub struct StatDefinition {
    id: Identifier,
    default: StatValue,
    range: StatRange,
}

impl StatDefinition {
    pub(crate) fn new(id: Identifier, default: StatValue, range: StatRange) -> Self {
        Self { id, default, range }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn kind(&self) -> StatKind {
        self.default.kind()
    }

    pub fn default_value(&self) -> &StatValue {
        &self.default
    }

    /// Clamp range; unbounded for non-numeric stats.
    pub fn range(&self) -> StatRange {
        self.range
    }
}

/// Typed handle to a registered stat.
///
/// `T` is the Rust type of the stat's value (`f32`, `u32` tier, `bool` flag
/// or [`Identifier`] choice); snapshots return it without casting.
pub struct StatDescriptor<T> {
    definition: Arc<StatDefinition>,
    default: T,
    _marker: PhantomData<fn() -> T>,
}

impl<T: StatType> StatDescriptor<T> {
    pub(crate) fn new(definition: Arc<StatDefinition>, default: T) -> Self {
        Self {
            definition,
            default,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> &Identifier {
        self.definition.id()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    pub fn range(&self) -> StatRange {
        self.definition.range()
    }

    pub fn definition(&self) -> &StatDefinition {
        &self.definition
    }

    pub(crate) fn shared_definition(&self) -> Arc<StatDefinition> {
        Arc::clone(&self.definition)
    }
}

impl<T: Clone> Clone for StatDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            default: self.default.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for StatDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.definition.id == other.definition.id
    }
}

impl<T> Eq for StatDescriptor<T> {}

impl<T: fmt::Debug> fmt::Debug for StatDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatDescriptor")
            .field("id", &self.definition.id)
            .field("default", &self.default)
            .finish()
    }
}

impl<T> fmt::Display for StatDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.definition.id, f)
    }
}
