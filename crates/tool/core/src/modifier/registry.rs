use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{Modifier, ModifierError, ModifierId};

/// Modifier definitions by identifier.
#[derive(Clone, Debug, Default)]
pub struct ModifierRegistry {
    modifiers: BTreeMap<ModifierId, Arc<Modifier>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`ModifierError::DuplicateModifier`] if the identifier is taken.
    pub fn register(&mut self, modifier: Modifier) -> Result<Arc<Modifier>, ModifierError> {
        if self.modifiers.contains_key(modifier.id()) {
            return Err(ModifierError::DuplicateModifier {
                modifier: modifier.id().clone(),
            });
        }

        debug!(
            target: "tool_core::modifiers",
            modifier = %modifier.id(),
            priority = modifier.priority(),
            modules = modifier.modules().len(),
            "registered modifier"
        );

        let modifier = Arc::new(modifier);
        self.modifiers
            .insert(modifier.id().clone(), Arc::clone(&modifier));
        Ok(modifier)
    }

    pub fn get(&self, id: &ModifierId) -> Option<&Arc<Modifier>> {
        self.modifiers.get(id)
    }

    /// # Errors
    ///
    /// Returns [`ModifierError::UnknownModifier`] if nothing is registered
    /// under `id`.
    pub fn require(&self, id: &ModifierId) -> Result<&Arc<Modifier>, ModifierError> {
        self.get(id).ok_or_else(|| ModifierError::UnknownModifier {
            modifier: id.clone(),
        })
    }

    pub fn contains(&self, id: &ModifierId) -> bool {
        self.modifiers.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Modifier>> + '_ {
        self.modifiers.values()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}
