use std::sync::Arc;

use crate::hooks::{HookObject, ModifierHooks, VolatileDataHook};
use crate::id::Identifier;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::{ToolRebuildContext, VolatileData};

static HOOKS: [Identifier; 1] = [ModifierHooks::VOLATILE_DATA];

/// Raises a volatile flag and adds the modifier level to the counter of the
/// same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolatileFlagModule {
    pub flag: Identifier,
}

impl ModifierModule for VolatileFlagModule {
    fn name(&self) -> &'static str {
        "volatile_flag"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn VolatileDataHook>(Arc::new(BoundModule::new(self.clone(), entry)))
    }
}

impl VolatileDataHook for BoundModule<VolatileFlagModule> {
    fn add_volatile_data(&self, _ctx: &ToolRebuildContext<'_>, volatile: &mut VolatileData) {
        volatile.set_flag(self.module.flag.clone());
        volatile.add_int(self.module.flag.clone(), i64::from(self.entry.level));
    }
}
