use crate::modifier::{MaterialId, ModifierEntry, ModifierId};
use crate::stats::StatsSnapshot;

use super::{ToolDefinition, VolatileData};

/// What rebuild-time hooks can see about the tool being built.
#[derive(Clone, Copy, Debug)]
pub struct ToolRebuildContext<'a> {
    pub definition: &'a ToolDefinition,
    pub materials: &'a [MaterialId],
    /// Active entries in contribution order.
    pub modifiers: &'a [ModifierEntry],
}

impl ToolRebuildContext<'_> {
    /// Level of a modifier on this tool, zero if absent.
    pub fn level(&self, modifier: &ModifierId) -> u32 {
        level_of(self.modifiers, modifier)
    }
}

/// Read-only view of a built tool handed to gameplay hooks.
#[derive(Clone, Copy, Debug)]
pub struct ToolView<'a> {
    pub stats: &'a StatsSnapshot,
    pub volatile: &'a VolatileData,
    pub modifiers: &'a [ModifierEntry],
}

impl ToolView<'_> {
    /// Level of a modifier on this tool, zero if absent.
    pub fn level(&self, modifier: &ModifierId) -> u32 {
        level_of(self.modifiers, modifier)
    }
}

fn level_of(entries: &[ModifierEntry], modifier: &ModifierId) -> u32 {
    entries
        .iter()
        .find(|entry| &entry.id == modifier)
        .map_or(0, |entry| entry.level)
}
