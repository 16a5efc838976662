use std::sync::Arc;

use crate::hooks::{CapacityHook, HookObject, ModifierHooks};
use crate::id::Identifier;
use crate::leveling::LevelingValue;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::CAPACITY];

/// Provides fluid capacity; capacities of several tanks add up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankModule {
    pub capacity: LevelingValue,
}

impl ModifierModule for TankModule {
    fn name(&self) -> &'static str {
        "tank"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn CapacityHook>(Arc::new(BoundModule::new(*self, entry)))
    }
}

impl CapacityHook for BoundModule<TankModule> {
    fn capacity(&self, _tool: &ToolView<'_>) -> u32 {
        // saturating float-to-int cast
        self.module.capacity.compute(self.level()).round() as u32
    }
}
