use std::fmt;
use std::str::FromStr;

use crate::id::{Identifier, IdentifierError};
use crate::leveling::EffectLevel;

use super::ModifierId;

/// One application of a modifier to a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierEntry {
    pub id: ModifierId,
    pub level: u32,
}

impl ModifierEntry {
    pub fn new(id: ModifierId, level: u32) -> Self {
        Self { id, level }
    }

    /// Level used by leveling formulas.
    pub fn effective_level(&self) -> f32 {
        self.level as f32
    }

    pub fn effect(&self) -> EffectLevel {
        EffectLevel::from(self.level)
    }

    /// Entries at level zero contribute nothing and are skipped on rebuild.
    pub fn is_active(&self) -> bool {
        self.level > 0
    }
}

impl fmt::Display for ModifierEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.level)
    }
}

/// Parses `namespace:path[@level]`; the level defaults to one.
impl FromStr for ModifierEntry {
    type Err = ModifierEntryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, level) = match s.rsplit_once('@') {
            Some((id, level)) => (
                id,
                level
                    .parse()
                    .map_err(|_| ModifierEntryParseError::Level(level.to_string()))?,
            ),
            None => (s, 1),
        };
        Ok(Self::new(id.parse()?, level))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierEntryParseError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error("invalid modifier level '{0}'")]
    Level(String),
}

/// Merges entries of the same modifier by summing their levels.
///
/// The result keeps the order in which each modifier first appears.
pub fn merge_entries<'a>(
    entries: impl IntoIterator<Item = &'a ModifierEntry>,
) -> Vec<ModifierEntry> {
    let mut merged: Vec<ModifierEntry> = Vec::new();
    for entry in entries {
        match merged.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => existing.level = existing.level.saturating_add(entry.level),
            None => merged.push(entry.clone()),
        }
    }
    merged
}

impl From<(Identifier, u32)> for ModifierEntry {
    fn from((id, level): (Identifier, u32)) -> Self {
        Self::new(id, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_level() {
        let entry: ModifierEntry = "tool:reinforced@3".parse().unwrap();
        assert_eq!(
            entry,
            ModifierEntry::new(Identifier::from_static("tool", "reinforced"), 3)
        );

        let entry: ModifierEntry = "haste".parse().unwrap();
        assert_eq!(entry.level, 1);
        assert_eq!(entry.id, Identifier::from_static("tool", "haste"));

        assert!(matches!(
            "tool:haste@x".parse::<ModifierEntry>(),
            Err(ModifierEntryParseError::Level(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        let entry = ModifierEntry::new(Identifier::from_static("tool", "haste"), 2);
        assert_eq!(entry.to_string(), "tool:haste@2");
        assert_eq!(entry.to_string().parse::<ModifierEntry>().unwrap(), entry);
    }

    #[test]
    fn merging_sums_levels_in_first_seen_order() {
        let a = Identifier::from_static("test", "a");
        let b = Identifier::from_static("test", "b");
        let entries = [
            ModifierEntry::new(a.clone(), 1),
            ModifierEntry::new(b.clone(), 2),
            ModifierEntry::new(a.clone(), 3),
        ];

        assert_eq!(
            merge_entries(&entries),
            vec![ModifierEntry::new(a, 4), ModifierEntry::new(b, 2)]
        );
    }
}
