//! Stat kinds and the dynamically typed stat value.

use std::fmt;

use crate::id::Identifier;

/// How contributions to a stat combine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Additive total times multiplicative total, clamped.
    Numeric,
    /// Highest value seen wins.
    Tier,
    /// Logical OR of every contribution.
    Flag,
    /// Last contribution wins.
    Choice,
}

/// A stat value of any kind.
///
/// Serialized untagged so snapshots read as a plain `id -> value` table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StatValue {
    Flag(bool),
    Tier(u32),
    Numeric(f32),
    Choice(Identifier),
}

impl StatValue {
    pub fn kind(&self) -> StatKind {
        match self {
            Self::Numeric(_) => StatKind::Numeric,
            Self::Tier(_) => StatKind::Tier,
            Self::Flag(_) => StatKind::Flag,
            Self::Choice(_) => StatKind::Choice,
        }
    }

    pub fn as_numeric(&self) -> Option<f32> {
        match self {
            Self::Numeric(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Tier(tier) => write!(f, "tier {tier}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Choice(choice) => write!(f, "{choice}"),
        }
    }
}

/// Rust types that can back a stat descriptor.
pub trait StatType: Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: StatKind;

    fn into_value(self) -> StatValue;

    fn from_value(value: &StatValue) -> Option<Self>;
}

impl StatType for f32 {
    const KIND: StatKind = StatKind::Numeric;

    fn into_value(self) -> StatValue {
        StatValue::Numeric(self)
    }

    fn from_value(value: &StatValue) -> Option<Self> {
        value.as_numeric()
    }
}

impl StatType for u32 {
    const KIND: StatKind = StatKind::Tier;

    fn into_value(self) -> StatValue {
        StatValue::Tier(self)
    }

    fn from_value(value: &StatValue) -> Option<Self> {
        match value {
            StatValue::Tier(tier) => Some(*tier),
            _ => None,
        }
    }
}

impl StatType for bool {
    const KIND: StatKind = StatKind::Flag;

    fn into_value(self) -> StatValue {
        StatValue::Flag(self)
    }

    fn from_value(value: &StatValue) -> Option<Self> {
        match value {
            StatValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl StatType for Identifier {
    const KIND: StatKind = StatKind::Choice;

    fn into_value(self) -> StatValue {
        StatValue::Choice(self)
    }

    fn from_value(value: &StatValue) -> Option<Self> {
        match value {
            StatValue::Choice(choice) => Some(choice.clone()),
            _ => None,
        }
    }
}
