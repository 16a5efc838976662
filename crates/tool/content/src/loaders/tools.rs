//! Tool definition loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tool_core::{ModifierEntry, PartSlot, StatRegistry, ToolDefinition, ToolId};

use crate::loaders::modifiers::StatBoostSpec;
use crate::loaders::{LoadResult, read_file};

/// Tool definition as written in `tools.ron`.
///
/// Traits are written as `"namespace:path@level"` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub id: ToolId,
    pub parts: Vec<PartSlot>,
    #[serde(default)]
    pub base: Vec<StatBoostSpec>,
    #[serde(default)]
    pub traits: Vec<String>,
}

impl ToolSpec {
    pub fn resolve(&self, stats: &StatRegistry) -> LoadResult<ToolDefinition> {
        let mut tool = ToolDefinition::new(self.id.clone(), self.parts.clone());
        for boost in &self.base {
            let boost = boost
                .resolve(stats)
                .map_err(|e| anyhow::anyhow!("Failed to resolve tool '{}': {}", self.id, e))?;
            tool = tool.with_base(boost);
        }
        for entry in &self.traits {
            let entry: ModifierEntry = entry.parse().map_err(|e| {
                anyhow::anyhow!("Invalid trait '{}' on tool '{}': {}", entry, self.id, e)
            })?;
            tool = tool.with_trait(entry);
        }
        Ok(tool)
    }
}

/// Tool catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolSpec>,
}

/// Loader for tool definitions from RON files.
pub struct ToolLoader;

impl ToolLoader {
    pub fn load(path: &Path, stats: &StatRegistry) -> LoadResult<Vec<ToolDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content, stats)
    }

    pub fn parse(content: &str, stats: &StatRegistry) -> LoadResult<Vec<ToolDefinition>> {
        let catalog: ToolCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tool catalog RON: {}", e))?;

        catalog
            .tools
            .iter()
            .map(|spec| spec.resolve(stats))
            .collect()
    }
}
