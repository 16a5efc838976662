use std::sync::Arc;

use crate::hooks::{HookObject, ModifierHooks, ToolActionHook};
use crate::id::Identifier;
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::tool::ToolView;

static HOOKS: [Identifier; 1] = [ModifierHooks::TOOL_ACTION];

/// Grants the tool a fixed set of actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolActionModule {
    pub actions: Vec<Identifier>,
}

impl ToolActionModule {
    pub fn new(actions: impl IntoIterator<Item = Identifier>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl ModifierModule for ToolActionModule {
    fn name(&self) -> &'static str {
        "tool_action"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn ToolActionHook>(Arc::new(BoundModule::new(self.clone(), entry)))
    }
}

impl ToolActionHook for BoundModule<ToolActionModule> {
    fn can_perform_action(&self, _tool: &ToolView<'_>, action: &Identifier) -> bool {
        self.module.actions.contains(action)
    }
}
