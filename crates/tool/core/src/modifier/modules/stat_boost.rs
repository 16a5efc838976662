//! Stat contributions: additive, multiplicative and overriding.

use std::sync::Arc;

use crate::hooks::{HookObject, ModifierHooks, ToolStatsHook};
use crate::id::Identifier;
use crate::leveling::{EffectLevel, LevelingValue};
use crate::modifier::{BoundModule, ModifierEntry, ModifierModule};
use crate::stats::{StatDescriptor, StatType, StatsBuilder};
use crate::tool::{ToolRebuildContext, VolatileData};

static HOOKS: [Identifier; 1] = [ModifierHooks::TOOL_STATS];

/// How a [`StatBoost`] applies its value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BoostOp {
    Add,
    Multiply,
    Set,
}

/// One leveled contribution to a numeric stat.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBoost {
    pub stat: StatDescriptor<f32>,
    pub op: BoostOp,
    pub value: LevelingValue,
}

impl StatBoost {
    pub fn new(stat: StatDescriptor<f32>, op: BoostOp, value: LevelingValue) -> Self {
        Self { stat, op, value }
    }

    pub fn add(stat: StatDescriptor<f32>, value: LevelingValue) -> Self {
        Self::new(stat, BoostOp::Add, value)
    }

    pub fn multiply(stat: StatDescriptor<f32>, value: LevelingValue) -> Self {
        Self::new(stat, BoostOp::Multiply, value)
    }

    pub fn set(stat: StatDescriptor<f32>, value: LevelingValue) -> Self {
        Self::new(stat, BoostOp::Set, value)
    }

    pub fn apply(&self, builder: &mut StatsBuilder<'_>, level: EffectLevel) {
        let value = level.scale(&self.value);
        match self.op {
            BoostOp::Add => builder.add(&self.stat, value),
            BoostOp::Multiply => builder.multiply(&self.stat, value),
            BoostOp::Set => builder.set(&self.stat, value),
        };
    }
}

/// Applies a list of [`StatBoost`]s scaled by the modifier level.
///
/// With `requires_flag` set, the boosts only apply when an earlier
/// volatile-data hook raised that flag.
#[derive(Clone, Debug, Default)]
pub struct StatBoostModule {
    pub boosts: Vec<StatBoost>,
    pub requires_flag: Option<Identifier>,
}

impl StatBoostModule {
    pub fn new(boosts: Vec<StatBoost>) -> Self {
        Self {
            boosts,
            requires_flag: None,
        }
    }

    #[must_use]
    pub fn requiring_flag(mut self, flag: Identifier) -> Self {
        self.requires_flag = Some(flag);
        self
    }
}

impl ModifierModule for StatBoostModule {
    fn name(&self) -> &'static str {
        "stat_boost"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn ToolStatsHook>(Arc::new(BoundModule::new(self.clone(), entry)))
    }
}

impl ToolStatsHook for BoundModule<StatBoostModule> {
    fn add_tool_stats(
        &self,
        _ctx: &ToolRebuildContext<'_>,
        volatile: &VolatileData,
        stats: &mut StatsBuilder<'_>,
    ) {
        if let Some(flag) = &self.module.requires_flag
            && !volatile.has_flag(flag)
        {
            return;
        }
        let effect = self.effect();
        for boost in &self.module.boosts {
            boost.apply(stats, effect);
        }
    }
}

/// Sets a stat of any kind to a fixed value.
///
/// Numeric stats are overridden (later boosts still stack on top), tiers are
/// raised, flags are turned on and choices are replaced.
#[derive(Clone, Debug)]
pub struct SetStatModule<T: StatType> {
    pub stat: StatDescriptor<T>,
    pub value: T,
}

impl<T: StatType> SetStatModule<T> {
    pub fn new(stat: StatDescriptor<T>, value: T) -> Self {
        Self { stat, value }
    }
}

impl<T: StatType> ModifierModule for SetStatModule<T> {
    fn name(&self) -> &'static str {
        "set_stat"
    }

    fn default_hooks(&self) -> &'static [Identifier] {
        &HOOKS
    }

    fn bind(&self, entry: &ModifierEntry) -> HookObject {
        HookObject::new(self.name())
            .with::<dyn ToolStatsHook>(Arc::new(BoundModule::new(self.clone(), entry)))
    }
}

impl<T: StatType> ToolStatsHook for BoundModule<SetStatModule<T>> {
    fn add_tool_stats(
        &self,
        _ctx: &ToolRebuildContext<'_>,
        _volatile: &VolatileData,
        stats: &mut StatsBuilder<'_>,
    ) {
        stats.set(&self.module.stat, self.module.value.clone());
    }
}
