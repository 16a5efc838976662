//! Material part stats and multi-part averaging.
//!
//! A tool is assembled from parts sitting in named slots. Each slot
//! contributes the arithmetic mean of its parts, and only then are slots
//! combined:
//!
//! ```text
//! durability    = (base + mean(head.durability) + mean(extra.durability))
//!                 × mean(handle.durability)
//! mining_speed  = (base + mean(head.mining_speed)) × mean(handle.mining_speed)
//! attack_damage = (base + mean(head.attack_damage)) × mean(handle.attack_damage)
//! attack_speed  = base × mean(handle.attack_speed)
//! harvest_tier  = max(head.harvest_tier)
//! ```
//!
//! An empty slot is neutral: it adds nothing and multiplies by one.

use std::collections::BTreeMap;

use tracing::trace;

use super::builder::StatsBuilder;
use super::tool_stats::ToolStats;
use super::StatError;
use crate::id::Identifier;

/// Named part position on a tool.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PartSlot {
    Head,
    Handle,
    Extra,
}

/// Stats a material provides as a tool head.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeadStats {
    pub durability: f32,
    pub mining_speed: f32,
    pub attack_damage: f32,
    pub harvest_tier: u32,
}

impl Default for HeadStats {
    fn default() -> Self {
        Self {
            durability: 1.0,
            mining_speed: 1.0,
            attack_damage: 1.0,
            harvest_tier: 0,
        }
    }
}

/// Multipliers a material provides as a handle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HandleStats {
    pub durability: f32,
    pub mining_speed: f32,
    pub attack_damage: f32,
    pub attack_speed: f32,
}

impl Default for HandleStats {
    fn default() -> Self {
        Self {
            durability: 1.0,
            mining_speed: 1.0,
            attack_damage: 1.0,
            attack_speed: 1.0,
        }
    }
}

/// Bonuses a material provides as an extra part (binding, plating).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExtraStats {
    pub durability: f32,
}

/// Stats of one material for every slot it can occupy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MaterialStats {
    pub head: Option<HeadStats>,
    pub handle: Option<HandleStats>,
    pub extra: Option<ExtraStats>,
}

impl MaterialStats {
    #[must_use]
    pub fn with_head(mut self, head: HeadStats) -> Self {
        self.head = Some(head);
        self
    }

    #[must_use]
    pub fn with_handle(mut self, handle: HandleStats) -> Self {
        self.handle = Some(handle);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: ExtraStats) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Material stat tables by material identifier.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: BTreeMap<Identifier, MaterialStats>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: Identifier, stats: MaterialStats) -> Result<(), StatError> {
        if self.materials.contains_key(&id) {
            return Err(StatError::DuplicateMaterial { material: id });
        }
        self.materials.insert(id, stats);
        Ok(())
    }

    pub fn get(&self, id: &Identifier) -> Option<&MaterialStats> {
        self.materials.get(id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.materials.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &MaterialStats)> + '_ {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Part stats of one tool grouped by slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartStatsBySlot {
    pub head: Vec<HeadStats>,
    pub handle: Vec<HandleStats>,
    pub extra: Vec<ExtraStats>,
}

impl PartStatsBySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the stats of each part from its material.
    ///
    /// Part `i` occupies `slots[i]` and is made of `materials[i]`. Missing
    /// materials, unknown materials and materials without stats for the slot
    /// fall back to the slot's default stats.
    pub fn collect(
        slots: &[PartSlot],
        materials: &[Identifier],
        registry: &MaterialRegistry,
    ) -> Self {
        let mut parts = Self::new();

        for (index, slot) in slots.iter().enumerate() {
            let stats = materials.get(index).and_then(|id| registry.get(id));
            if stats.is_none() {
                trace!(
                    target: "tool_core::stats",
                    index,
                    slot = %slot,
                    material = ?materials.get(index),
                    "part falls back to default stats"
                );
            }

            match slot {
                PartSlot::Head => parts
                    .head
                    .push(stats.and_then(|s| s.head).unwrap_or_default()),
                PartSlot::Handle => parts
                    .handle
                    .push(stats.and_then(|s| s.handle).unwrap_or_default()),
                PartSlot::Extra => parts
                    .extra
                    .push(stats.and_then(|s| s.extra).unwrap_or_default()),
            }
        }

        parts
    }

    #[must_use]
    pub fn with_head(mut self, head: HeadStats) -> Self {
        self.head.push(head);
        self
    }

    #[must_use]
    pub fn with_handle(mut self, handle: HandleStats) -> Self {
        self.handle.push(handle);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: ExtraStats) -> Self {
        self.extra.push(extra);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.handle.is_empty() && self.extra.is_empty()
    }

    /// Contributes the averaged part stats to `builder`.
    pub fn add_to(&self, builder: &mut StatsBuilder<'_>, stats: &ToolStats) {
        if let Some(durability) = mean(self.head.iter().map(|h| h.durability)) {
            builder.add(&stats.durability, durability);
        }
        if let Some(speed) = mean(self.head.iter().map(|h| h.mining_speed)) {
            builder.add(&stats.mining_speed, speed);
        }
        if let Some(attack) = mean(self.head.iter().map(|h| h.attack_damage)) {
            builder.add(&stats.attack_damage, attack);
        }
        if let Some(tier) = self.head.iter().map(|h| h.harvest_tier).max() {
            builder.set(&stats.harvest_tier, tier);
        }

        if let Some(durability) = mean(self.extra.iter().map(|e| e.durability)) {
            builder.add(&stats.durability, durability);
        }

        if let Some(durability) = mean(self.handle.iter().map(|h| h.durability)) {
            builder.multiply(&stats.durability, durability);
        }
        if let Some(speed) = mean(self.handle.iter().map(|h| h.mining_speed)) {
            builder.multiply(&stats.mining_speed, speed);
        }
        if let Some(attack) = mean(self.handle.iter().map(|h| h.attack_damage)) {
            builder.multiply(&stats.attack_damage, attack);
        }
        if let Some(speed) = mean(self.handle.iter().map(|h| h.attack_speed)) {
            builder.multiply(&stats.attack_speed, speed);
        }
    }
}

/// Arithmetic mean, or `None` for an empty slot.
fn mean(values: impl ExactSizeIterator<Item = f32>) -> Option<f32> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    Some(values.sum::<f32>() / count as f32)
}
