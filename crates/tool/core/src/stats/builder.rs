//! Stat accumulation for one rebuild.
//!
//! Numeric stats follow a fixed order:
//!
//! ```text
//! result = clamp((default + Σ add) × Π multiply, min, max)
//! ```
//!
//! `set` replaces the additive total and resets the multiplier, so later
//! `add` / `multiply` calls stack on top of the set value. Tier stats keep
//! the highest value seen, flags are OR-ed and choices are overridden.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use super::descriptor::{StatDefinition, StatDescriptor};
use super::registry::StatRegistry;
use super::snapshot::StatsSnapshot;
use super::value::{StatType, StatValue};
use crate::id::Identifier;

#[derive(Clone, Debug)]
enum Accumulator {
    Numeric { additive: f32, multiplier: f32 },
    Value(StatValue),
}

#[derive(Clone, Debug)]
struct Entry {
    definition: Arc<StatDefinition>,
    accumulator: Accumulator,
}

impl Entry {
    fn new(definition: Arc<StatDefinition>) -> Self {
        let accumulator = match definition.default_value() {
            StatValue::Numeric(value) => Accumulator::Numeric {
                additive: *value,
                multiplier: 1.0,
            },
            other => Accumulator::Value(other.clone()),
        };
        Self {
            definition,
            accumulator,
        }
    }

    fn resolve(&self) -> StatValue {
        match &self.accumulator {
            Accumulator::Numeric {
                additive,
                multiplier,
            } => StatValue::Numeric(self.definition.range().clamp(additive * multiplier)),
            Accumulator::Value(value) => value.clone(),
        }
    }
}

/// Mutable stat totals, frozen into a [`StatsSnapshot`] by [`build`].
///
/// [`build`]: StatsBuilder::build
#[derive(Clone, Debug)]
pub struct StatsBuilder<'r> {
    registry: &'r StatRegistry,
    entries: BTreeMap<Identifier, Entry>,
}

impl<'r> StatsBuilder<'r> {
    pub fn new(registry: &'r StatRegistry) -> Self {
        Self {
            registry,
            entries: BTreeMap::new(),
        }
    }

    fn entry<T: StatType>(&mut self, stat: &StatDescriptor<T>) -> &mut Entry {
        self.entries
            .entry(stat.id().clone())
            .or_insert_with(|| Entry::new(stat.shared_definition()))
    }

    /// Adds `delta` to the additive total.
    pub fn add(&mut self, stat: &StatDescriptor<f32>, delta: f32) -> &mut Self {
        trace!(target: "tool_core::stats", stat = %stat, delta, "add");
        if let Accumulator::Numeric { additive, .. } = &mut self.entry(stat).accumulator {
            *additive += delta;
        }
        self
    }

    /// Multiplies the multiplicative total by `factor`.
    pub fn multiply(&mut self, stat: &StatDescriptor<f32>, factor: f32) -> &mut Self {
        trace!(target: "tool_core::stats", stat = %stat, factor, "multiply");
        if let Accumulator::Numeric { multiplier, .. } = &mut self.entry(stat).accumulator {
            *multiplier *= factor;
        }
        self
    }

    /// Overrides a stat according to its kind.
    ///
    /// - numeric: additive total becomes `value`, multiplier resets to 1
    /// - tier: keeps the higher of the current tier and `value`
    /// - flag: OR-ed into the current flag
    /// - choice: replaced
    pub fn set<T: StatType>(&mut self, stat: &StatDescriptor<T>, value: T) -> &mut Self {
        let value = value.into_value();
        trace!(target: "tool_core::stats", stat = %stat, value = %value, "set");

        let entry = self.entry(stat);
        entry.accumulator = match (&entry.accumulator, value) {
            (Accumulator::Numeric { .. }, StatValue::Numeric(value)) => Accumulator::Numeric {
                additive: value,
                multiplier: 1.0,
            },
            (Accumulator::Value(StatValue::Tier(current)), StatValue::Tier(tier)) => {
                Accumulator::Value(StatValue::Tier((*current).max(tier)))
            }
            (Accumulator::Value(StatValue::Flag(current)), StatValue::Flag(flag)) => {
                Accumulator::Value(StatValue::Flag(*current || flag))
            }
            (_, value) => Accumulator::Value(value),
        };
        self
    }

    /// Value the stat would have if the builder were frozen now.
    pub fn current<T: StatType>(&self, stat: &StatDescriptor<T>) -> T {
        self.entries
            .get(stat.id())
            .and_then(|entry| T::from_value(&entry.resolve()))
            .unwrap_or_else(|| stat.default_value().clone())
    }

    /// Returns true if any contribution touched `id`.
    pub fn is_touched(&self, id: &Identifier) -> bool {
        self.entries.contains_key(id)
    }

    /// Freezes the totals.
    ///
    /// Every stat in the registry appears in the snapshot; untouched stats
    /// hold their default.
    pub fn build(self) -> StatsSnapshot {
        let mut values: BTreeMap<Identifier, StatValue> = self
            .registry
            .defaults()
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();

        for (id, entry) in &self.entries {
            values.insert(id.clone(), entry.resolve());
        }

        trace!(
            target: "tool_core::stats",
            stats = values.len(),
            touched = self.entries.len(),
            "stats built"
        );

        StatsSnapshot::from_values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatRange;

    struct Fixture {
        registry: StatRegistry,
        damage: StatDescriptor<f32>,
        speed: StatDescriptor<f32>,
        tier: StatDescriptor<u32>,
        glowing: StatDescriptor<bool>,
        repair: StatDescriptor<Identifier>,
    }

    fn fixture() -> Fixture {
        let mut registry = StatRegistry::new();
        let damage = registry
            .register_numeric(
                Identifier::from_static("test", "damage"),
                0.0,
                StatRange::new(0.0, 1000.0),
            )
            .unwrap();
        let speed = registry
            .register_numeric(
                Identifier::from_static("test", "speed"),
                1.0,
                StatRange::new(0.5, 10.0),
            )
            .unwrap();
        let tier = registry
            .register_tier(Identifier::from_static("test", "tier"), 1)
            .unwrap();
        let glowing = registry
            .register_flag(Identifier::from_static("test", "glowing"), false)
            .unwrap();
        let repair = registry
            .register_choice(
                Identifier::from_static("test", "repair"),
                Identifier::from_static("test", "none"),
            )
            .unwrap();
        Fixture {
            registry,
            damage,
            speed,
            tier,
            glowing,
            repair,
        }
    }

    #[test]
    fn additive_sum_is_multiplied_once() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder.add(&f.damage, 5.0).multiply(&f.damage, 2.0).add(&f.damage, 3.0);

        assert_eq!(builder.build().get(&f.damage), 16.0);
    }

    #[test]
    fn interleaving_unrelated_stats_does_not_change_result() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder
            .add(&f.damage, 5.0)
            .add(&f.speed, 1.0)
            .multiply(&f.damage, 2.0)
            .multiply(&f.speed, 3.0)
            .set(&f.tier, 2)
            .add(&f.damage, 3.0);
        let snapshot = builder.build();

        assert_eq!(snapshot.get(&f.damage), 16.0);
        assert_eq!(snapshot.get(&f.speed), 6.0);
    }

    #[test]
    fn numeric_result_is_clamped() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder.add(&f.speed, -100.0).add(&f.damage, 600.0).multiply(&f.damage, 4.0);
        let snapshot = builder.build();

        assert_eq!(snapshot.get(&f.speed), 0.5);
        assert_eq!(snapshot.get(&f.damage), 1000.0);
    }

    #[test]
    fn nan_resolves_to_floor() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder.add(&f.speed, f32::NAN);

        assert_eq!(builder.build().get(&f.speed), 0.5);
    }

    #[test]
    fn set_then_modify_applies_on_top() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder
            .add(&f.damage, 100.0)
            .multiply(&f.damage, 10.0)
            .set(&f.damage, 4.0)
            .add(&f.damage, 1.0)
            .multiply(&f.damage, 2.0);

        assert_eq!(builder.build().get(&f.damage), 10.0);
    }

    #[test]
    fn tier_keeps_maximum_and_flag_ors() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder
            .set(&f.tier, 3)
            .set(&f.tier, 2)
            .set(&f.glowing, true)
            .set(&f.glowing, false)
            .set(&f.repair, Identifier::from_static("test", "iron"))
            .set(&f.repair, Identifier::from_static("test", "gold"));
        let snapshot = builder.build();

        assert_eq!(snapshot.get(&f.tier), 3);
        assert!(snapshot.get(&f.glowing));
        assert_eq!(snapshot.get(&f.repair), Identifier::from_static("test", "gold"));
    }

    #[test]
    fn tier_never_drops_below_default() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        builder.set(&f.tier, 0);

        assert_eq!(builder.build().get(&f.tier), 1);
    }

    #[test]
    fn untouched_builder_yields_every_default() {
        let f = fixture();
        let snapshot = StatsBuilder::new(&f.registry).build();

        assert_eq!(snapshot.len(), f.registry.len());
        for definition in f.registry.iter() {
            assert_eq!(snapshot.value(definition.id()), Some(definition.default_value()));
        }
    }

    #[test]
    fn current_reports_provisional_value() {
        let f = fixture();
        let mut builder = StatsBuilder::new(&f.registry);
        assert_eq!(builder.current(&f.speed), 1.0);

        builder.add(&f.speed, 1.0).multiply(&f.speed, 1.5);
        assert_eq!(builder.current(&f.speed), 3.0);
        assert!(builder.is_touched(f.speed.id()));
        assert!(!builder.is_touched(f.damage.id()));
    }
}
