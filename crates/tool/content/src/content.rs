use std::collections::BTreeMap;
use std::sync::Arc;

use tool_core::{ToolDefinition, ToolEnv, ToolId, ToolStack};

/// A frozen environment plus the tool definitions loaded next to it.
#[derive(Clone, Debug)]
pub struct Content {
    env: Arc<ToolEnv>,
    tools: BTreeMap<ToolId, Arc<ToolDefinition>>,
}

impl Content {
    pub fn new(env: Arc<ToolEnv>, tools: impl IntoIterator<Item = ToolDefinition>) -> Self {
        let tools = tools
            .into_iter()
            .map(|tool| (tool.id.clone(), Arc::new(tool)))
            .collect();
        Self { env, tools }
    }

    pub fn env(&self) -> &Arc<ToolEnv> {
        &self.env
    }

    pub fn tool(&self, id: &ToolId) -> Option<&Arc<ToolDefinition>> {
        self.tools.get(id)
    }

    /// Tool definitions ordered by id.
    pub fn tools(&self) -> impl Iterator<Item = &Arc<ToolDefinition>> + '_ {
        self.tools.values()
    }

    /// Returns `None` if `tool` is not loaded.
    pub fn stack(
        &self,
        tool: &ToolId,
        materials: Vec<tool_core::MaterialId>,
    ) -> Option<Result<ToolStack, tool_core::RebuildError>> {
        let definition = self.tools.get(tool)?;
        Some(ToolStack::new(
            Arc::clone(&self.env),
            Arc::clone(definition),
            materials,
        ))
    }
}
