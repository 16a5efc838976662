use std::sync::Arc;

use crate::hooks::{HarvestTierHook, HookObject, ModifierHooks};
use crate::id::Identifier;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::HARVEST_TIER];

/// Caps the harvest tier at `max_tier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierCapModule {
    pub max_tier: u32,
}

impl ModifierModule for TierCapModule {
    fn name(&self) -> &'static str {
        "tier_cap"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn HarvestTierHook>(Arc::new(BoundModule::new(*self, entry)))
    }
}

impl HarvestTierHook for BoundModule<TierCapModule> {
    fn modify_tier(&self, _tool: &ToolView<'_>, tier: u32) -> u32 {
        tier.min(self.module.max_tier)
    }
}

/// Raises the harvest tier by `bonus` per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierBoostModule {
    pub bonus: u32,
}

impl ModifierModule for TierBoostModule {
    fn name(&self) -> &'static str {
        "tier_boost"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn HarvestTierHook>(Arc::new(BoundModule::new(*self, entry)))
    }
}

impl HarvestTierHook for BoundModule<TierBoostModule> {
    fn modify_tier(&self, _tool: &ToolView<'_>, tier: u32) -> u32 {
        tier.saturating_add(self.module.bonus.saturating_mul(self.entry.level))
    }
}
