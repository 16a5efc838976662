//! Tool configuration loader.

use std::path::Path;

use tool_core::ToolConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ToolConfig`] from TOML files.
///
/// Every key is optional; missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<ToolConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ToolConfig> {
        let config: ToolConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_level == 0 {
            anyhow::bail!("max_level must be at least 1");
        }
        Ok(config)
    }
}
