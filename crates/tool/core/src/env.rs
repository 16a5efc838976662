//! The registries a rebuild reads, bundled.

use std::sync::Arc;

use tracing::info;

use crate::config::ToolConfig;
use crate::error::{ErrorSeverity, ToolError};
use crate::hooks::{HookError, HookRegistry, ModifierHooks};
use crate::modifier::{MaterialId, Modifier, ModifierError, ModifierRegistry};
use crate::stats::{MaterialRegistry, MaterialStats, StatError, StatRegistry, ToolStats};
use crate::tool::{RebuildError, ToolBuild, ToolInput, ToolRebuilder};

/// Every registry a rebuild needs, plus the built-in hook and stat tokens.
///
/// Filled during startup through `&mut self` and then shared behind an
/// `Arc`; all rebuild-time access is read-only.
#[derive(Debug)]
pub struct ToolEnv {
    hooks: HookRegistry,
    hook_tokens: ModifierHooks,
    stats: StatRegistry,
    tool_stats: ToolStats,
    modifiers: ModifierRegistry,
    materials: MaterialRegistry,
    config: ToolConfig,
}

impl ToolEnv {
    /// Creates an environment with the built-in hooks and stats registered.
    pub fn new(config: ToolConfig) -> Result<Self, EnvError> {
        let mut hooks = HookRegistry::new();
        let hook_tokens = ModifierHooks::register(&mut hooks)?;
        let mut stats = StatRegistry::new();
        let tool_stats = ToolStats::register(&mut stats)?;

        Ok(Self {
            hooks,
            hook_tokens,
            stats,
            tool_stats,
            modifiers: ModifierRegistry::new(),
            materials: MaterialRegistry::new(),
            config,
        })
    }

    /// Validates and registers a modifier.
    ///
    /// # Errors
    ///
    /// Fails if the modifier's hooks do not build on their own or the
    /// identifier is taken.
    pub fn register_modifier(&mut self, modifier: Modifier) -> Result<Arc<Modifier>, EnvError> {
        modifier.validate(&self.hooks)?;
        Ok(self.modifiers.register(modifier)?)
    }

    pub fn register_material(
        &mut self,
        id: MaterialId,
        stats: MaterialStats,
    ) -> Result<(), EnvError> {
        Ok(self.materials.register(id, stats)?)
    }

    /// Registry for hooks beyond the built-in set.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Registry for stats beyond the built-in set.
    pub fn stats_mut(&mut self) -> &mut StatRegistry {
        &mut self.stats
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn hook_tokens(&self) -> &ModifierHooks {
        &self.hook_tokens
    }

    pub fn stats(&self) -> &StatRegistry {
        &self.stats
    }

    pub fn tool_stats(&self) -> &ToolStats {
        &self.tool_stats
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn rebuilder(&self) -> ToolRebuilder<'_> {
        ToolRebuilder::new(self)
    }

    pub fn rebuild(&self, input: &ToolInput<'_>) -> Result<ToolBuild, RebuildError> {
        self.rebuilder().rebuild(input)
    }

    /// Freezes the environment for sharing.
    pub fn into_shared(self) -> Arc<Self> {
        info!(
            target: "tool_core::env",
            hooks = self.hooks.len(),
            stats = self.stats.len(),
            modifiers = self.modifiers.len(),
            materials = self.materials.len(),
            "tool environment ready"
        );
        Arc::new(self)
    }
}

/// Errors raised while filling a [`ToolEnv`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EnvError {
    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Stat(#[from] StatError),

    #[error(transparent)]
    Modifier(#[from] ModifierError),
}

impl ToolError for EnvError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Hook(err) => err.severity(),
            Self::Stat(err) => err.severity(),
            Self::Modifier(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Hook(err) => err.error_code(),
            Self::Stat(err) => err.error_code(),
            Self::Modifier(err) => err.error_code(),
        }
    }
}
