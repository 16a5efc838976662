//! The rebuild pipeline.
//!
//! ```text
//! traits + modifiers ─> merge levels ─> limits ─> resolve ─> sort by priority
//!                                                                │
//!          ModifierHookMapBuilder <─ register_hooks per entry <──┘
//!                    │
//!                    ▼
//!   volatile_data hook ─> base stats ─> part stats ─> tool_stats hook ─> freeze
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::env::ToolEnv;
use crate::error::{ErrorSeverity, ToolError};
use crate::hooks::{HookError, ModifierHookMap, ModifierHookMapBuilder};
use crate::modifier::{MaterialId, ModifierEntry, ModifierId, merge_entries};
use crate::stats::{MaterialRegistry, PartStatsBySlot, StatsBuilder, StatsSnapshot};

use super::{ToolDefinition, ToolRebuildContext, ToolView, VolatileData};

/// Everything a rebuild reads.
#[derive(Clone, Debug)]
pub struct ToolInput<'a> {
    pub definition: &'a ToolDefinition,
    pub materials: &'a [MaterialId],
    pub parts: PartStatsBySlot,
    pub modifiers: &'a [ModifierEntry],
}

impl<'a> ToolInput<'a> {
    /// Collects part stats from `materials` by part index.
    pub fn new(
        definition: &'a ToolDefinition,
        materials: &'a [MaterialId],
        modifiers: &'a [ModifierEntry],
        registry: &MaterialRegistry,
    ) -> Self {
        Self {
            definition,
            materials,
            parts: PartStatsBySlot::collect(&definition.parts, materials, registry),
            modifiers,
        }
    }

    /// Uses precomputed part stats.
    pub fn with_parts(
        definition: &'a ToolDefinition,
        parts: PartStatsBySlot,
        modifiers: &'a [ModifierEntry],
    ) -> Self {
        Self {
            definition,
            materials: &[],
            parts,
            modifiers,
        }
    }
}

/// Immutable result of a rebuild.
#[derive(Clone, Debug)]
pub struct ToolBuild {
    /// Active entries (traits merged in, level zero dropped) in contribution
    /// order.
    pub modifiers: Vec<ModifierEntry>,
    pub hooks: Arc<ModifierHookMap>,
    pub stats: Arc<StatsSnapshot>,
    pub volatile: Arc<VolatileData>,
}

impl ToolBuild {
    pub fn view(&self) -> ToolView<'_> {
        ToolView {
            stats: &self.stats,
            volatile: &self.volatile,
            modifiers: &self.modifiers,
        }
    }
}

/// Errors that fail a rebuild.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RebuildError {
    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("modifier '{modifier}' is not registered")]
    UnknownModifier { modifier: ModifierId },

    #[error("material '{material}' is not registered")]
    UnknownMaterial { material: MaterialId },

    #[error("tool has {count} modifiers, at most {max} are allowed")]
    TooManyModifiers { count: usize, max: usize },

    #[error("modifier '{modifier}' has level {level}, at most {max} is allowed")]
    LevelTooHigh {
        modifier: ModifierId,
        level: u32,
        max: u32,
    },
}

impl ToolError for RebuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Hook(err) => err.severity(),
            Self::UnknownModifier { .. } | Self::UnknownMaterial { .. } => {
                ErrorSeverity::Configuration
            }
            Self::TooManyModifiers { .. } | Self::LevelTooHigh { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Hook(err) => err.error_code(),
            Self::UnknownModifier { .. } => "unknown_modifier",
            Self::UnknownMaterial { .. } => "unknown_material",
            Self::TooManyModifiers { .. } => "too_many_modifiers",
            Self::LevelTooHigh { .. } => "level_too_high",
        }
    }
}

/// Runs rebuilds against one environment.
#[derive(Clone, Copy, Debug)]
pub struct ToolRebuilder<'e> {
    env: &'e ToolEnv,
}

impl<'e> ToolRebuilder<'e> {
    pub fn new(env: &'e ToolEnv) -> Self {
        Self { env }
    }

    /// Builds the hook map, volatile data and stats of one tool.
    ///
    /// Pure: the same input always yields the same build.
    ///
    /// # Errors
    ///
    /// See [`RebuildError`]. Nothing is partially applied on failure.
    pub fn rebuild(&self, input: &ToolInput<'_>) -> Result<ToolBuild, RebuildError> {
        let env = self.env;
        let config = env.config();
        let definition = input.definition;

        debug!(
            target: "tool_core::rebuild",
            tool = %definition.id,
            materials = input.materials.len(),
            modifiers = input.modifiers.len(),
            "rebuilding tool"
        );

        if let Some(material) = input
            .materials
            .iter()
            .find(|material| !env.materials().contains(material))
        {
            return Err(RebuildError::UnknownMaterial {
                material: material.clone(),
            });
        }

        let requested = merge_entries(definition.traits.iter().chain(input.modifiers));
        if requested.len() > config.max_modifiers {
            return Err(RebuildError::TooManyModifiers {
                count: requested.len(),
                max: config.max_modifiers,
            });
        }

        let mut active = Vec::with_capacity(requested.len());
        for entry in requested {
            let modifier = env.modifiers().get(&entry.id).ok_or_else(|| {
                RebuildError::UnknownModifier {
                    modifier: entry.id.clone(),
                }
            })?;
            if entry.level > config.max_level {
                return Err(RebuildError::LevelTooHigh {
                    modifier: entry.id,
                    level: entry.level,
                    max: config.max_level,
                });
            }
            if !entry.is_active() {
                trace!(target: "tool_core::rebuild", modifier = %entry.id, "skipping level 0");
                continue;
            }
            active.push((Arc::clone(modifier), entry));
        }

        // equal priorities fall back to the modifier id, never request order
        active.sort_by(|(a, _), (b, _)| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.id().cmp(b.id()))
        });

        let mut builder = ModifierHookMapBuilder::new(env.hooks());
        for (modifier, entry) in &active {
            modifier.register_hooks(entry, &mut builder)?;
        }
        let hooks = builder.build()?;

        let modifiers: Vec<ModifierEntry> = active.into_iter().map(|(_, entry)| entry).collect();
        let ctx = ToolRebuildContext {
            definition,
            materials: input.materials,
            modifiers: &modifiers,
        };
        let tokens = env.hook_tokens();

        let mut volatile = VolatileData::new();
        hooks
            .get_or_default(&tokens.volatile_data)
            .add_volatile_data(&ctx, &mut volatile);

        let mut stats = StatsBuilder::new(env.stats());
        definition.add_base_stats(&mut stats);
        input.parts.add_to(&mut stats, env.tool_stats());
        hooks
            .get_or_default(&tokens.tool_stats)
            .add_tool_stats(&ctx, &volatile, &mut stats);
        let stats = stats.build();

        debug!(
            target: "tool_core::rebuild",
            tool = %definition.id,
            active = modifiers.len(),
            hooks = hooks.len(),
            "tool rebuilt"
        );

        Ok(ToolBuild {
            modifiers,
            hooks: Arc::new(hooks),
            stats: Arc::new(stats),
            volatile: Arc::new(volatile),
        })
    }
}
