use crate::id::Identifier;
use crate::leveling::EffectLevel;
use crate::modifier::ModifierEntry;
use crate::modifier::modules::StatBoost;
use crate::stats::{PartSlot, StatsBuilder};

pub type ToolId = Identifier;

/// Static shape of a tool: its part slots, base stats and innate modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolDefinition {
    pub id: ToolId,
    /// Slot of each part, by part index.
    pub parts: Vec<PartSlot>,
    /// Applied before part stats; only the `flat` component counts.
    pub base: Vec<StatBoost>,
    /// Modifiers every instance of the tool carries.
    pub traits: Vec<ModifierEntry>,
}

impl ToolDefinition {
    pub fn new(id: ToolId, parts: Vec<PartSlot>) -> Self {
        Self {
            id,
            parts,
            base: Vec::new(),
            traits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, boost: StatBoost) -> Self {
        self.base.push(boost);
        self
    }

    #[must_use]
    pub fn with_trait(mut self, entry: ModifierEntry) -> Self {
        self.traits.push(entry);
        self
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub(crate) fn add_base_stats(&self, builder: &mut StatsBuilder<'_>) {
        for boost in &self.base {
            boost.apply(builder, EffectLevel::NONE);
        }
    }
}
