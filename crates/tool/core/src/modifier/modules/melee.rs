use std::sync::Arc;

use rand::RngCore;

use crate::hooks::{HookObject, MeleeDamageHook, ModifierHooks};
use crate::id::Identifier;
use crate::leveling::RandomLevelingValue;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::MELEE_DAMAGE];

/// Adds a rolled bonus to every hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SharpnessModule {
    pub bonus: RandomLevelingValue,
}

impl ModifierModule for SharpnessModule {
    fn name(&self) -> &'static str {
        "sharpness"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn MeleeDamageHook>(Arc::new(BoundModule::new(*self, entry)))
    }
}

impl MeleeDamageHook for BoundModule<SharpnessModule> {
    fn modify_damage(&self, _tool: &ToolView<'_>, damage: f32, rng: &mut dyn RngCore) -> f32 {
        damage + self.module.bonus.compute(rng, self.level())
    }
}
