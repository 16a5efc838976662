use std::sync::Arc;

use rand::RngCore;

use crate::env::ToolEnv;
use crate::hooks::{InteractionResult, ModifierHookMap};
use crate::id::Identifier;
use crate::modifier::{MaterialId, ModifierEntry, ModifierId};
use crate::stats::{StatDescriptor, StatType, StatsSnapshot};

use super::{RebuildError, ToolBuild, ToolDefinition, ToolInput, ToolView};

/// Host-side view of one tool instance.
///
/// Owns the tool's materials, modifier list and last build. Every mutation
/// rebuilds first and only commits if the rebuild succeeds, so a rejected
/// change leaves the stack untouched.
#[derive(Clone, Debug)]
pub struct ToolStack {
    env: Arc<ToolEnv>,
    definition: Arc<ToolDefinition>,
    materials: Vec<MaterialId>,
    modifiers: Vec<ModifierEntry>,
    build: ToolBuild,
    damage: u32,
}

impl ToolStack {
    pub fn new(
        env: Arc<ToolEnv>,
        definition: Arc<ToolDefinition>,
        materials: Vec<MaterialId>,
    ) -> Result<Self, RebuildError> {
        let build = compute(&env, &definition, &materials, &[])?;
        Ok(Self {
            env,
            definition,
            materials,
            modifiers: Vec::new(),
            build,
            damage: 0,
        })
    }

    pub fn set_modifiers(&mut self, modifiers: Vec<ModifierEntry>) -> Result<(), RebuildError> {
        let build = compute(&self.env, &self.definition, &self.materials, &modifiers)?;
        self.modifiers = modifiers;
        self.commit(build);
        Ok(())
    }

    /// Adds `levels` to a modifier, applying it if absent.
    pub fn add_modifier(&mut self, id: ModifierId, levels: u32) -> Result<(), RebuildError> {
        let mut modifiers = self.modifiers.clone();
        match modifiers.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.level = entry.level.saturating_add(levels),
            None => modifiers.push(ModifierEntry::new(id, levels)),
        }
        self.set_modifiers(modifiers)
    }

    /// Removes a modifier entirely. Returns false if it was not applied.
    pub fn remove_modifier(&mut self, id: &ModifierId) -> Result<bool, RebuildError> {
        if !self.modifiers.iter().any(|entry| &entry.id == id) {
            return Ok(false);
        }
        let modifiers = self
            .modifiers
            .iter()
            .filter(|entry| &entry.id != id)
            .cloned()
            .collect();
        self.set_modifiers(modifiers)?;
        Ok(true)
    }

    pub fn set_materials(&mut self, materials: Vec<MaterialId>) -> Result<(), RebuildError> {
        let build = compute(&self.env, &self.definition, &materials, &self.modifiers)?;
        self.materials = materials;
        self.commit(build);
        Ok(())
    }

    fn commit(&mut self, build: ToolBuild) {
        self.build = build;
        self.damage = self.damage.min(self.max_durability());
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    /// Modifiers applied to this instance, excluding definition traits.
    pub fn modifiers(&self) -> &[ModifierEntry] {
        &self.modifiers
    }

    pub fn build(&self) -> &ToolBuild {
        &self.build
    }

    pub fn stats(&self) -> &StatsSnapshot {
        &self.build.stats
    }

    pub fn hooks(&self) -> &ModifierHookMap {
        &self.build.hooks
    }

    pub fn view(&self) -> ToolView<'_> {
        self.build.view()
    }

    pub fn stat<T: StatType>(&self, stat: &StatDescriptor<T>) -> T {
        self.build.stats.get(stat)
    }

    /// Level of a modifier after traits are merged in.
    pub fn level(&self, id: &ModifierId) -> u32 {
        self.view().level(id)
    }

    /// Harvest tier after every tier hook ran.
    pub fn harvest_tier(&self) -> u32 {
        let tier = self.stat(&self.env.tool_stats().harvest_tier);
        self.hooks()
            .get_or_default(&self.env.hook_tokens().harvest_tier)
            .modify_tier(&self.view(), tier)
    }

    pub fn can_perform(&self, action: &Identifier) -> bool {
        self.hooks()
            .get_or_default(&self.env.hook_tokens().tool_action)
            .can_perform_action(&self.view(), action)
    }

    pub fn capacity(&self) -> u32 {
        self.hooks()
            .get_or_default(&self.env.hook_tokens().capacity)
            .capacity(&self.view())
    }

    pub fn interact(&self) -> InteractionResult {
        self.hooks()
            .get_or_default(&self.env.hook_tokens().interaction)
            .on_interact(&self.view())
    }

    /// Damage of one hit after melee hooks ran.
    pub fn melee_damage(&self, rng: &mut dyn RngCore) -> f32 {
        let base = self.stat(&self.env.tool_stats().attack_damage);
        self.hooks()
            .get_or_default(&self.env.hook_tokens().melee_damage)
            .modify_damage(&self.view(), base, rng)
            .max(0.0)
    }

    /// Applies durability damage and returns the amount actually taken.
    ///
    /// Unbreakable tools take nothing; otherwise the amount is capped at the
    /// durability left and tool-damage hooks may reduce it further.
    pub fn damage(&mut self, amount: u32, rng: &mut dyn RngCore) -> u32 {
        if self.stat(&self.env.tool_stats().unbreakable) {
            return 0;
        }
        let amount = amount.min(self.durability_left());
        if amount == 0 {
            return 0;
        }
        let taken = self
            .hooks()
            .get_or_default(&self.env.hook_tokens().tool_damage)
            .on_damage_tool(&self.view(), amount, rng);
        let before = self.damage;
        self.damage = self.damage.saturating_add(taken).min(self.max_durability());
        self.damage.saturating_sub(before)
    }

    pub fn repair(&mut self, amount: u32) {
        self.damage = self.damage.saturating_sub(amount);
    }

    pub fn current_damage(&self) -> u32 {
        self.damage
    }

    pub fn max_durability(&self) -> u32 {
        // saturating float-to-int cast
        self.stat(&self.env.tool_stats().durability) as u32
    }

    pub fn durability_left(&self) -> u32 {
        self.max_durability().saturating_sub(self.damage)
    }

    pub fn is_broken(&self) -> bool {
        !self.stat(&self.env.tool_stats().unbreakable) && self.durability_left() == 0
    }
}

fn compute(
    env: &ToolEnv,
    definition: &ToolDefinition,
    materials: &[MaterialId],
    modifiers: &[ModifierEntry],
) -> Result<ToolBuild, RebuildError> {
    let input = ToolInput::new(definition, materials, modifiers, env.materials());
    env.rebuilder().rebuild(&input)
}
