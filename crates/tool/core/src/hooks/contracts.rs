//! Hook contracts every tool understands.
//!
//! Each contract comes with the merged implementation matching its strategy.
//! [`ModifierHooks::register`] installs the whole set into a registry and
//! returns the typed tokens.

use std::sync::Arc;

use rand::RngCore;

use super::merge::{AllMerger, AnyMerger, ComposeMerger, MergeAll, MergeAny, MergeCompose};
use super::{HookError, HookRegistry, HookToken};
use crate::id::Identifier;
use crate::stats::StatsBuilder;
use crate::tool::{ToolRebuildContext, ToolView, VolatileData};

// ============================================================================
// Contracts
// ============================================================================

/// Writes per-build flags before stats are computed.
pub trait VolatileDataHook: Send + Sync {
    fn add_volatile_data(&self, ctx: &ToolRebuildContext<'_>, volatile: &mut VolatileData);
}

/// Contributes to the tool's stats.
pub trait ToolStatsHook: Send + Sync {
    fn add_tool_stats(
        &self,
        ctx: &ToolRebuildContext<'_>,
        volatile: &VolatileData,
        stats: &mut StatsBuilder<'_>,
    );
}

/// Answers whether the tool can perform an action.
pub trait ToolActionHook: Send + Sync {
    fn can_perform_action(&self, tool: &ToolView<'_>, action: &Identifier) -> bool;
}

/// Adjusts the harvest tier the tool mines at.
pub trait HarvestTierHook: Send + Sync {
    fn modify_tier(&self, tool: &ToolView<'_>, tier: u32) -> u32;
}

/// Adjusts durability damage before it is applied; returns the damage left.
pub trait ToolDamageHook: Send + Sync {
    fn on_damage_tool(&self, tool: &ToolView<'_>, amount: u32, rng: &mut dyn RngCore) -> u32;
}

/// Adjusts melee damage dealt by the tool.
pub trait MeleeDamageHook: Send + Sync {
    fn modify_damage(&self, tool: &ToolView<'_>, damage: f32, rng: &mut dyn RngCore) -> f32;
}

/// Fluid capacity the tool provides.
pub trait CapacityHook: Send + Sync {
    fn capacity(&self, tool: &ToolView<'_>) -> u32;
}

/// Outcome of [`InteractionHook::on_interact`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionResult {
    /// Nothing handled the interaction.
    Pass,
    /// The named action was performed.
    Perform(Identifier),
}

/// Handles using the tool on its own. Single owner.
pub trait InteractionHook: Send + Sync {
    fn on_interact(&self, tool: &ToolView<'_>) -> InteractionResult;
}

// ============================================================================
// Merged implementations
// ============================================================================

impl VolatileDataHook for AllMerger<dyn VolatileDataHook> {
    fn add_volatile_data(&self, ctx: &ToolRebuildContext<'_>, volatile: &mut VolatileData) {
        for hook in self.hooks() {
            hook.add_volatile_data(ctx, volatile);
        }
    }
}

impl MergeAll for dyn VolatileDataHook {
    fn merge_all(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(AllMerger::new(hooks))
    }
}

impl ToolStatsHook for AllMerger<dyn ToolStatsHook> {
    fn add_tool_stats(
        &self,
        ctx: &ToolRebuildContext<'_>,
        volatile: &VolatileData,
        stats: &mut StatsBuilder<'_>,
    ) {
        for hook in self.hooks() {
            hook.add_tool_stats(ctx, volatile, stats);
        }
    }
}

impl MergeAll for dyn ToolStatsHook {
    fn merge_all(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(AllMerger::new(hooks))
    }
}

impl ToolActionHook for AnyMerger<dyn ToolActionHook> {
    fn can_perform_action(&self, tool: &ToolView<'_>, action: &Identifier) -> bool {
        self.hooks()
            .iter()
            .any(|hook| hook.can_perform_action(tool, action))
    }
}

impl MergeAny for dyn ToolActionHook {
    fn merge_any(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(AnyMerger::new(hooks))
    }
}

impl HarvestTierHook for ComposeMerger<dyn HarvestTierHook> {
    fn modify_tier(&self, tool: &ToolView<'_>, tier: u32) -> u32 {
        self.hooks()
            .iter()
            .fold(tier, |tier, hook| hook.modify_tier(tool, tier))
    }
}

impl MergeCompose for dyn HarvestTierHook {
    fn merge_compose(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(ComposeMerger::new(hooks))
    }
}

impl ToolDamageHook for ComposeMerger<dyn ToolDamageHook> {
    fn on_damage_tool(&self, tool: &ToolView<'_>, amount: u32, rng: &mut dyn RngCore) -> u32 {
        let mut amount = amount;
        for hook in self.hooks() {
            if amount == 0 {
                break;
            }
            amount = hook.on_damage_tool(tool, amount, rng);
        }
        amount
    }
}

impl MergeCompose for dyn ToolDamageHook {
    fn merge_compose(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(ComposeMerger::new(hooks))
    }
}

impl MeleeDamageHook for ComposeMerger<dyn MeleeDamageHook> {
    fn modify_damage(&self, tool: &ToolView<'_>, damage: f32, rng: &mut dyn RngCore) -> f32 {
        let mut damage = damage;
        for hook in self.hooks() {
            damage = hook.modify_damage(tool, damage, rng);
        }
        damage
    }
}

impl MergeCompose for dyn MeleeDamageHook {
    fn merge_compose(hooks: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(ComposeMerger::new(hooks))
    }
}

/// Sum of every contributor's capacity.
pub struct SummedCapacity(Vec<Arc<dyn CapacityHook>>);

impl CapacityHook for SummedCapacity {
    fn capacity(&self, tool: &ToolView<'_>) -> u32 {
        self.0
            .iter()
            .fold(0u32, |total, hook| total.saturating_add(hook.capacity(tool)))
    }
}

/// Custom merge for [`CapacityHook`]: capacities add up.
pub fn sum_capacity(hooks: Vec<Arc<dyn CapacityHook>>) -> Arc<dyn CapacityHook> {
    Arc::new(SummedCapacity(hooks))
}

struct NoInteraction;

impl InteractionHook for NoInteraction {
    fn on_interact(&self, _tool: &ToolView<'_>) -> InteractionResult {
        InteractionResult::Pass
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// Typed tokens for the built-in hooks.
#[derive(Clone, Debug)]
pub struct ModifierHooks {
    pub volatile_data: HookToken<dyn VolatileDataHook>,
    pub tool_stats: HookToken<dyn ToolStatsHook>,
    pub tool_action: HookToken<dyn ToolActionHook>,
    pub harvest_tier: HookToken<dyn HarvestTierHook>,
    pub tool_damage: HookToken<dyn ToolDamageHook>,
    pub melee_damage: HookToken<dyn MeleeDamageHook>,
    pub capacity: HookToken<dyn CapacityHook>,
    pub interaction: HookToken<dyn InteractionHook>,
}

impl ModifierHooks {
    pub const VOLATILE_DATA: Identifier = Identifier::from_static("tool", "volatile_data");
    pub const TOOL_STATS: Identifier = Identifier::from_static("tool", "tool_stats");
    pub const TOOL_ACTION: Identifier = Identifier::from_static("tool", "tool_action");
    pub const HARVEST_TIER: Identifier = Identifier::from_static("tool", "harvest_tier");
    pub const TOOL_DAMAGE: Identifier = Identifier::from_static("tool", "tool_damage");
    pub const MELEE_DAMAGE: Identifier = Identifier::from_static("tool", "melee_damage");
    pub const CAPACITY: Identifier = Identifier::from_static("tool", "capacity");
    pub const INTERACTION: Identifier = Identifier::from_static("tool", "interaction");

    /// Registers every built-in hook.
    ///
    /// # Errors
    ///
    /// Fails if any built-in identity is already taken in `registry`.
    pub fn register(registry: &mut HookRegistry) -> Result<Self, HookError> {
        Ok(Self {
            volatile_data: registry.register_all(Self::VOLATILE_DATA)?,
            tool_stats: registry.register_all(Self::TOOL_STATS)?,
            tool_action: registry.register_any(Self::TOOL_ACTION)?,
            harvest_tier: registry.register_compose(Self::HARVEST_TIER)?,
            tool_damage: registry.register_compose(Self::TOOL_DAMAGE)?,
            melee_damage: registry.register_compose(Self::MELEE_DAMAGE)?,
            capacity: registry.register_custom(
                Self::CAPACITY,
                sum_capacity(Vec::new()),
                sum_capacity,
            )?,
            interaction: registry.register_exclusive::<dyn InteractionHook>(
                Self::INTERACTION,
                Arc::new(NoInteraction),
            )?,
        })
    }
}
