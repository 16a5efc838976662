use std::fmt;

use crate::hooks::HookObject;
use crate::id::Identifier;
use crate::leveling::EffectLevel;

use super::ModifierEntry;

/// A reusable piece of modifier behavior.
///
/// Modules are stateless configuration. On every rebuild a module is bound to
/// the entry that applies it, producing a [`HookObject`] whose facets are the
/// hook contracts the bound module implements. The hooks listed by
/// [`default_hooks`] are registered automatically; a modifier may override
/// that list with any hooks the bound object supports.
///
/// [`default_hooks`]: ModifierModule::default_hooks
pub trait ModifierModule: Send + Sync + fmt::Debug {
    /// Short name used in diagnostics and contributor lists.
    fn name(&self) -> &'static str;

    fn default_hooks(&self) -> &'static [Identifier];

    fn bind(&self, entry: &ModifierEntry) -> HookObject;
}

/// A module bound to the level of the entry applying it.
#[derive(Clone, Debug)]
pub struct BoundModule<M> {
    pub module: M,
    pub entry: ModifierEntry,
}

impl<M> BoundModule<M> {
    pub fn new(module: M, entry: &ModifierEntry) -> Self {
        Self {
            module,
            entry: entry.clone(),
        }
    }

    pub fn level(&self) -> f32 {
        self.entry.effective_level()
    }

    pub fn effect(&self) -> EffectLevel {
        self.entry.effect()
    }
}
