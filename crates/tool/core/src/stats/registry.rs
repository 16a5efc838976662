//! Append-only registry of stat definitions.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::StatError;
use super::descriptor::{StatDefinition, StatDescriptor, StatRange};
use super::value::{StatType, StatValue};
use crate::id::Identifier;

/// Every stat a tool can carry.
///
/// Like the hook registry, this is filled once at startup and then shared
/// read-only. Iteration is ordered by identifier.
#[derive(Clone, Debug, Default)]
pub struct StatRegistry {
    stats: BTreeMap<Identifier, Arc<StatDefinition>>,
}

impl StatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a numeric stat clamped to `range`.
    ///
    /// # Errors
    ///
    /// - [`StatError::InvalidRange`] if the range is inverted or does not
    ///   contain `default`
    /// - [`StatError::DuplicateStat`] if `id` is taken
    pub fn register_numeric(
        &mut self,
        id: Identifier,
        default: f32,
        range: StatRange,
    ) -> Result<StatDescriptor<f32>, StatError> {
        if !range.is_valid() || !range.contains(default) {
            return Err(StatError::InvalidRange {
                stat: id,
                min: range.min,
                max: range.max,
                default,
            });
        }
        self.insert(id, default, range)
    }

    /// Registers a tier stat; contributions resolve to the highest tier.
    pub fn register_tier(
        &mut self,
        id: Identifier,
        default: u32,
    ) -> Result<StatDescriptor<u32>, StatError> {
        self.insert(id, default, StatRange::UNBOUNDED)
    }

    /// Registers a flag stat; contributions are OR-ed.
    pub fn register_flag(
        &mut self,
        id: Identifier,
        default: bool,
    ) -> Result<StatDescriptor<bool>, StatError> {
        self.insert(id, default, StatRange::UNBOUNDED)
    }

    /// Registers a choice stat; the last contribution wins.
    pub fn register_choice(
        &mut self,
        id: Identifier,
        default: Identifier,
    ) -> Result<StatDescriptor<Identifier>, StatError> {
        self.insert(id, default, StatRange::UNBOUNDED)
    }

    fn insert<T: StatType>(
        &mut self,
        id: Identifier,
        default: T,
        range: StatRange,
    ) -> Result<StatDescriptor<T>, StatError> {
        if self.stats.contains_key(&id) {
            return Err(StatError::DuplicateStat { stat: id });
        }

        let definition = Arc::new(StatDefinition::new(
            id.clone(),
            default.clone().into_value(),
            range,
        ));

        debug!(
            target: "tool_core::stats",
            stat = %id,
            kind = %T::KIND,
            "registered stat"
        );

        self.stats.insert(id, Arc::clone(&definition));
        Ok(StatDescriptor::new(definition, default))
    }

    /// Resolves a typed descriptor for a registered stat.
    ///
    /// # Errors
    ///
    /// - [`StatError::UnknownStat`] if nothing is registered under `id`
    /// - [`StatError::KindMismatch`] if the stat is not of kind `T::KIND`
    pub fn descriptor<T: StatType>(&self, id: &Identifier) -> Result<StatDescriptor<T>, StatError> {
        let definition = self
            .stats
            .get(id)
            .ok_or_else(|| StatError::UnknownStat { stat: id.clone() })?;

        let default = T::from_value(definition.default_value()).ok_or_else(|| {
            StatError::KindMismatch {
                stat: id.clone(),
                expected: T::KIND,
                actual: definition.kind(),
            }
        })?;

        Ok(StatDescriptor::new(Arc::clone(definition), default))
    }

    pub fn get(&self, id: &Identifier) -> Option<&StatDefinition> {
        self.stats.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.stats.contains_key(id)
    }

    /// Definitions ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &StatDefinition> + '_ {
        self.stats.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub(crate) fn defaults(&self) -> impl Iterator<Item = (&Identifier, &StatValue)> + '_ {
        self.stats
            .iter()
            .map(|(id, definition)| (id, definition.default_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatKind;

    const SPEED: Identifier = Identifier::from_static("test", "speed");

    #[test]
    fn numeric_default_must_be_in_range() {
        let mut registry = StatRegistry::new();
        let err = registry
            .register_numeric(SPEED, -1.0, StatRange::new(0.0, 10.0))
            .unwrap_err();
        assert!(matches!(err, StatError::InvalidRange { .. }));

        let err = registry
            .register_numeric(SPEED, 1.0, StatRange::new(10.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StatError::InvalidRange { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_stat_is_rejected_across_kinds() {
        let mut registry = StatRegistry::new();
        registry
            .register_numeric(SPEED, 1.0, StatRange::new(0.0, 10.0))
            .unwrap();
        assert_eq!(
            registry.register_flag(SPEED, false).unwrap_err(),
            StatError::DuplicateStat { stat: SPEED }
        );
    }

    #[test]
    fn descriptor_lookup_checks_kind() {
        let mut registry = StatRegistry::new();
        registry
            .register_numeric(SPEED, 2.5, StatRange::new(0.0, 10.0))
            .unwrap();

        let speed = registry.descriptor::<f32>(&SPEED).unwrap();
        assert_eq!(*speed.default_value(), 2.5);

        assert_eq!(
            registry.descriptor::<u32>(&SPEED).unwrap_err(),
            StatError::KindMismatch {
                stat: SPEED,
                expected: StatKind::Tier,
                actual: StatKind::Numeric,
            }
        );

        let missing = Identifier::from_static("test", "missing");
        assert!(matches!(
            registry.descriptor::<f32>(&missing),
            Err(StatError::UnknownStat { .. })
        ));
    }
}
