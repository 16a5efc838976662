//! Content factory for building a tool environment from data files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tool_core::{
    MaterialId, MaterialStats, Modifier, StatRegistry, ToolConfig, ToolDefinition, ToolEnv,
};
use tracing::{debug, info};

use crate::content::Content;
use crate::loaders::{ConfigLoader, LoadResult, MaterialLoader, ModifierLoader, ToolLoader};

/// Content factory that loads all tool content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── materials.ron
/// ├── modifiers.ron
/// └── tools.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load configuration from `config.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<ToolConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(
                target: "tool_content::loaders",
                path = %path.display(),
                "no config file, using defaults"
            );
            return Ok(ToolConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load material part stats from `materials.ron`.
    pub fn load_materials(&self) -> LoadResult<Vec<(MaterialId, MaterialStats)>> {
        MaterialLoader::load(&self.data_dir.join("materials.ron"))
    }

    /// Load modifiers from `modifiers.ron`, resolving stat ids against `stats`.
    pub fn load_modifiers(
        &self,
        stats: &StatRegistry,
        default_priority: i32,
    ) -> LoadResult<Vec<Modifier>> {
        ModifierLoader::load(&self.data_dir.join("modifiers.ron"), stats, default_priority)
    }

    /// Load tool definitions from `tools.ron`.
    pub fn load_tools(&self, stats: &StatRegistry) -> LoadResult<Vec<ToolDefinition>> {
        ToolLoader::load(&self.data_dir.join("tools.ron"), stats)
    }

    /// Load everything and register it into a fresh environment.
    ///
    /// Modifiers are validated on registration and tool traits must name a
    /// loaded modifier.
    pub fn build(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let default_priority = config.default_priority;
        let mut env = ToolEnv::new(config)
            .map_err(|e| anyhow::anyhow!("Failed to create tool environment: {}", e))?;

        for (id, stats) in self.load_materials()? {
            env.register_material(id, stats)
                .map_err(|e| anyhow::anyhow!("Failed to register material: {}", e))?;
        }

        for modifier in self.load_modifiers(env.stats(), default_priority)? {
            env.register_modifier(modifier)
                .map_err(|e| anyhow::anyhow!("Failed to register modifier: {}", e))?;
        }

        let tools = self.load_tools(env.stats())?;
        let mut seen = BTreeSet::new();
        for tool in &tools {
            if !seen.insert(&tool.id) {
                anyhow::bail!("Tool '{}' is defined twice", tool.id);
            }
            if let Some(missing) = tool
                .traits
                .iter()
                .find(|entry| !env.modifiers().contains(&entry.id))
            {
                anyhow::bail!(
                    "Tool '{}' has unknown trait modifier '{}'",
                    tool.id,
                    missing.id
                );
            }
        }

        info!(
            target: "tool_content::loaders",
            data_dir = %self.data_dir.display(),
            materials = env.materials().len(),
            modifiers = env.modifiers().len(),
            tools = tools.len(),
            "loaded tool content"
        );

        Ok(Content::new(env.into_shared(), tools))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
