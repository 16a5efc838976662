use std::collections::{BTreeMap, BTreeSet};

use crate::id::Identifier;

/// Flags and counters computed at the start of a rebuild.
///
/// Written by volatile-data hooks before any stat hook runs, so stat hooks
/// can condition on what other modifiers declared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatileData {
    flags: BTreeSet<Identifier>,
    ints: BTreeMap<Identifier, i64>,
}

impl VolatileData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flag(&mut self, flag: Identifier) {
        self.flags.insert(flag);
    }

    pub fn has_flag(&self, flag: &Identifier) -> bool {
        self.flags.contains(flag)
    }

    /// Adds `delta` to a counter, starting from zero.
    pub fn add_int(&mut self, key: Identifier, delta: i64) {
        let value = self.ints.entry(key).or_insert(0);
        *value = value.saturating_add(delta);
    }

    pub fn get_int(&self, key: &Identifier) -> i64 {
        self.ints.get(key).copied().unwrap_or(0)
    }

    pub fn flags(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.flags.iter()
    }

    pub fn ints(&self) -> impl Iterator<Item = (&Identifier, i64)> + '_ {
        self.ints.iter().map(|(key, value)| (key, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.ints.is_empty()
    }
}
