use std::sync::Arc;

use crate::hooks::{
    HookObject, InteractionHook, InteractionResult, ModifierHooks, ToolActionHook,
};
use crate::id::Identifier;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::INTERACTION];

/// Performs `action` when the tool is used on its own.
///
/// Also answers [`ToolActionHook`] for its action, though only the
/// interaction hook is registered unless a modifier lists both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionModule {
    pub action: Identifier,
}

impl ModifierModule for InteractionModule {
    fn name(&self) -> &'static str {
        "interaction"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        let bound = Arc::new(BoundModule::new(self.clone(), entry));
        HookObject::new(self.name())
            .with::<dyn InteractionHook>(bound.clone())
            .with::<dyn ToolActionHook>(bound)
    }
}

impl InteractionHook for BoundModule<InteractionModule> {
    fn on_interact(&self, _tool: &ToolView<'_>) -> InteractionResult {
        InteractionResult::Perform(self.module.action.clone())
    }
}

impl ToolActionHook for BoundModule<InteractionModule> {
    fn can_perform_action(&self, _tool: &ToolView<'_>, action: &Identifier) -> bool {
        &self.module.action == action
    }
}
