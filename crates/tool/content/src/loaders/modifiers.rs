//! Modifier catalog loader.
//!
//! Modifiers are written as lists of stock modules. Stat ids inside module
//! specs are resolved to typed descriptors while loading, so a stat that is
//! missing or of the wrong kind fails here instead of at rebuild time.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tool_core::modifier::ModuleEntry;
use tool_core::modifier::modules::{
    BoostOp, InteractionModule, ReinforcedModule, SetStatModule, SharpnessModule, StatBoost,
    StatBoostModule, TankModule, TierBoostModule, TierCapModule, ToolActionModule,
    VolatileFlagModule,
};
use tool_core::{
    Identifier, LevelingValue, Modifier, ModifierId, ModifierModule, RandomLevelingValue,
    StatKind, StatRegistry, StatValue,
};

use crate::loaders::{LoadResult, read_file};

/// One leveled numeric stat contribution, by stat id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBoostSpec {
    pub stat: Identifier,
    pub op: BoostOp,
    pub value: LevelingValue,
}

impl StatBoostSpec {
    pub fn resolve(&self, stats: &StatRegistry) -> LoadResult<StatBoost> {
        let stat = stats
            .descriptor::<f32>(&self.stat)
            .map_err(|e| anyhow::anyhow!("Invalid stat boost: {}", e))?;
        Ok(StatBoost::new(stat, self.op, self.value))
    }
}

/// Stock module selection with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleKindSpec {
    StatBoost {
        boosts: Vec<StatBoostSpec>,
        #[serde(default)]
        requires_flag: Option<Identifier>,
    },
    /// Value kind must match the stat; numeric stats also accept integers.
    SetStat { stat: Identifier, value: StatValue },
    TierCap { max_tier: u32 },
    TierBoost { bonus: u32 },
    ToolAction { actions: Vec<Identifier> },
    VolatileFlag { flag: Identifier },
    Reinforced { ignore_chance: LevelingValue },
    Sharpness { bonus: RandomLevelingValue },
    Tank { capacity: LevelingValue },
    Interaction { action: Identifier },
}

impl ModuleKindSpec {
    pub fn resolve(&self, stats: &StatRegistry) -> LoadResult<Arc<dyn ModifierModule>> {
        let module: Arc<dyn ModifierModule> = match self {
            Self::StatBoost {
                boosts,
                requires_flag,
            } => {
                let boosts = boosts
                    .iter()
                    .map(|boost| boost.resolve(stats))
                    .collect::<LoadResult<Vec<_>>>()?;
                let mut module = StatBoostModule::new(boosts);
                if let Some(flag) = requires_flag {
                    module = module.requiring_flag(flag.clone());
                }
                Arc::new(module)
            }
            Self::SetStat { stat, value } => set_stat(stats, stat, value)?,
            Self::TierCap { max_tier } => Arc::new(TierCapModule {
                max_tier: *max_tier,
            }),
            Self::TierBoost { bonus } => Arc::new(TierBoostModule { bonus: *bonus }),
            Self::ToolAction { actions } => Arc::new(ToolActionModule::new(actions.clone())),
            Self::VolatileFlag { flag } => Arc::new(VolatileFlagModule { flag: flag.clone() }),
            Self::Reinforced { ignore_chance } => Arc::new(ReinforcedModule {
                ignore_chance: *ignore_chance,
            }),
            Self::Sharpness { bonus } => Arc::new(SharpnessModule { bonus: *bonus }),
            Self::Tank { capacity } => Arc::new(TankModule {
                capacity: *capacity,
            }),
            Self::Interaction { action } => Arc::new(InteractionModule {
                action: action.clone(),
            }),
        };
        Ok(module)
    }
}

fn set_stat(
    stats: &StatRegistry,
    stat: &Identifier,
    value: &StatValue,
) -> LoadResult<Arc<dyn ModifierModule>> {
    let definition = stats
        .get(stat)
        .ok_or_else(|| anyhow::anyhow!("Unknown stat '{}'", stat))?;

    let module: Arc<dyn ModifierModule> = match (definition.kind(), value) {
        (StatKind::Numeric, StatValue::Numeric(v)) => {
            Arc::new(SetStatModule::new(stats.descriptor::<f32>(stat)?, *v))
        }
        (StatKind::Numeric, StatValue::Tier(v)) => {
            Arc::new(SetStatModule::new(stats.descriptor::<f32>(stat)?, *v as f32))
        }
        (StatKind::Tier, StatValue::Tier(v)) => {
            Arc::new(SetStatModule::new(stats.descriptor::<u32>(stat)?, *v))
        }
        (StatKind::Flag, StatValue::Flag(v)) => {
            Arc::new(SetStatModule::new(stats.descriptor::<bool>(stat)?, *v))
        }
        (StatKind::Choice, StatValue::Choice(v)) => Arc::new(SetStatModule::new(
            stats.descriptor::<Identifier>(stat)?,
            v.clone(),
        )),
        (kind, value) => anyhow::bail!(
            "Stat '{}' is {}, cannot set it to {} ({})",
            stat,
            kind,
            value,
            value.kind()
        ),
    };
    Ok(module)
}

/// A module plus an optional explicit hook list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub module: ModuleKindSpec,
    #[serde(default)]
    pub hooks: Option<Vec<Identifier>>,
}

/// Modifier definition as written in `modifiers.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub id: ModifierId,
    /// Falls back to the configured default priority.
    #[serde(default)]
    pub priority: Option<i32>,
    pub modules: Vec<ModuleSpec>,
}

impl ModifierSpec {
    pub fn resolve(&self, stats: &StatRegistry, default_priority: i32) -> LoadResult<Modifier> {
        let mut modifier =
            Modifier::new(self.id.clone(), self.priority.unwrap_or(default_priority));
        for spec in &self.modules {
            let module = spec.module.resolve(stats).map_err(|e| {
                anyhow::anyhow!("Failed to resolve modifier '{}': {}", self.id, e)
            })?;
            modifier = modifier.with_module_entry(ModuleEntry {
                module,
                hooks: spec.hooks.clone(),
            });
        }
        Ok(modifier)
    }
}

/// Modifier catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierCatalog {
    pub modifiers: Vec<ModifierSpec>,
}

/// Loader for modifier definitions from RON files.
pub struct ModifierLoader;

impl ModifierLoader {
    /// Load and resolve every modifier in a RON file.
    ///
    /// Hook lists are not checked here; registering the modifiers in a
    /// [`ToolEnv`](tool_core::ToolEnv) validates them.
    pub fn load(
        path: &Path,
        stats: &StatRegistry,
        default_priority: i32,
    ) -> LoadResult<Vec<Modifier>> {
        let content = read_file(path)?;
        Self::parse(&content, stats, default_priority)
    }

    pub fn parse(
        content: &str,
        stats: &StatRegistry,
        default_priority: i32,
    ) -> LoadResult<Vec<Modifier>> {
        let catalog: ModifierCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse modifier catalog RON: {}", e))?;

        catalog
            .modifiers
            .iter()
            .map(|spec| spec.resolve(stats, default_priority))
            .collect()
    }
}
