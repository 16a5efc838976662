use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::hooks::{HookObject, ModifierHooks, ToolDamageHook};
use crate::id::Identifier;
use crate::leveling::LevelingValue;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::TOOL_DAMAGE];

/// Each point of durability damage is ignored with a leveled chance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReinforcedModule {
    pub ignore_chance: LevelingValue,
}

impl ModifierModule for ReinforcedModule {
    fn name(&self) -> &'static str {
        "reinforced"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn ToolDamageHook>(Arc::new(BoundModule::new(*self, entry)))
    }
}

impl ToolDamageHook for BoundModule<ReinforcedModule> {
    fn on_damage_tool(&self, _tool: &ToolView<'_>, amount: u32, rng: &mut dyn RngCore) -> u32 {
        let chance = self.module.ignore_chance.compute(self.level());
        if chance.is_nan() || chance <= 0.0 {
            return amount;
        }
        if chance >= 1.0 {
            return 0;
        }
        let chance = f64::from(chance);
        (0..amount).filter(|_| !rng.random_bool(chance)).count() as u32
    }
}
