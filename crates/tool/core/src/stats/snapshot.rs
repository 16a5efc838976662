//! Frozen stat tables.

use std::collections::BTreeMap;

use super::descriptor::StatDescriptor;
use super::value::{StatType, StatValue};
use crate::id::Identifier;

/// Immutable stat values of one tool build.
///
/// Holds a value for every registered stat. Serializes as a flat
/// `identifier -> value` table ordered by identifier, which is what hosts send
/// over the wire or persist.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StatsSnapshot {
    values: BTreeMap<Identifier, StatValue>,
}

impl StatsSnapshot {
    pub(crate) fn from_values(values: BTreeMap<Identifier, StatValue>) -> Self {
        Self { values }
    }

    /// Reads a stat, falling back to the descriptor's default when the
    /// snapshot was built against a registry without it.
    pub fn get<T: StatType>(&self, stat: &StatDescriptor<T>) -> T {
        self.values
            .get(stat.id())
            .and_then(T::from_value)
            .unwrap_or_else(|| stat.default_value().clone())
    }

    /// Untyped lookup by identifier.
    pub fn value(&self, id: &Identifier) -> Option<&StatValue> {
        self.values.get(id)
    }

    /// Iterates values in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &StatValue)> + '_ {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::stats::{StatRange, StatRegistry, StatsBuilder};

    #[test]
    fn serializes_as_flat_table() {
        let mut registry = StatRegistry::new();
        let damage = registry
            .register_numeric(
                Identifier::from_static("tool", "damage"),
                0.0,
                StatRange::new(0.0, 100.0),
            )
            .unwrap();
        let tier = registry
            .register_tier(Identifier::from_static("tool", "tier"), 0)
            .unwrap();
        registry
            .register_flag(Identifier::from_static("tool", "shiny"), false)
            .unwrap();

        let mut builder = StatsBuilder::new(&registry);
        builder.add(&damage, 2.5).set(&tier, 3);
        let snapshot = builder.build();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"tool:damage":2.5,"tool:shiny":false,"tool:tier":3}"#
        );

        let decoded: StatsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
