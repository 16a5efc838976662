//! Append-only registry of hook definitions.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::HookError;
use super::merge::{MergeAll, MergeAny, MergeCompose};
use super::token::{DynHook, HookDefinition, HookToken, MergeFn, Merger};
use crate::id::Identifier;

struct RegisteredHook {
    erased: Arc<dyn DynHook>,
    /// Boxed `HookToken<H>` for typed lookups by identity.
    typed: Box<dyn Any + Send + Sync>,
}

/// Registry of every hook the engine knows about.
///
/// Registration takes `&mut self` and is expected during startup only; once
/// built the registry is shared behind an `Arc` and read without locking.
/// Entries are never removed or replaced.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<Identifier, RegisteredHook>,
    order: Vec<Identifier>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook with an explicit default implementation and merger.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateToken`] if `id` is already registered.
    pub fn register<H>(
        &mut self,
        id: Identifier,
        default: Arc<H>,
        merger: Merger<H>,
    ) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        if self.hooks.contains_key(&id) {
            return Err(HookError::DuplicateToken { hook: id });
        }

        let token = HookToken::from_definition(Arc::new(HookDefinition::new(
            id.clone(),
            default,
            merger,
        )));

        debug!(
            target: "tool_core::hooks",
            hook = %id,
            strategy = %token.strategy(),
            "registered hook"
        );

        self.hooks.insert(
            id.clone(),
            RegisteredHook {
                erased: token.erased(),
                typed: Box::new(token.clone()),
            },
        );
        self.order.push(id);
        Ok(token)
    }

    /// Registers a hook that invokes every implementation.
    ///
    /// The default is the empty merge, which does nothing.
    pub fn register_all<H>(&mut self, id: Identifier) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + MergeAll + Send + Sync + 'static,
    {
        self.register(id, H::merge_all(Vec::new()), Merger::all())
    }

    /// Registers a hook that stops at the first implementation reporting
    /// success.
    ///
    /// The default is the empty merge, which reports failure.
    pub fn register_any<H>(&mut self, id: Identifier) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + MergeAny + Send + Sync + 'static,
    {
        self.register(id, H::merge_any(Vec::new()), Merger::any())
    }

    /// Registers a hook whose implementations are chained.
    ///
    /// The default is the empty composition, which is the identity.
    pub fn register_compose<H>(&mut self, id: Identifier) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + MergeCompose + Send + Sync + 'static,
    {
        self.register(id, H::merge_compose(Vec::new()), Merger::compose())
    }

    /// Registers a hook that at most one module may implement.
    pub fn register_exclusive<H>(
        &mut self,
        id: Identifier,
        default: Arc<H>,
    ) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        self.register(id, default, Merger::exclusive())
    }

    /// Registers a hook with a hook-specific merge function.
    pub fn register_custom<H>(
        &mut self,
        id: Identifier,
        default: Arc<H>,
        merge: MergeFn<H>,
    ) -> Result<HookToken<H>, HookError>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        self.register(id, default, Merger::custom(merge))
    }

    /// Looks up a hook by identity without knowing its contract.
    pub fn get(&self, id: &Identifier) -> Option<&Arc<dyn DynHook>> {
        self.hooks.get(id).map(|hook| &hook.erased)
    }

    /// Looks up a typed token by identity.
    ///
    /// Returns `None` if the hook is unknown or its contract is not `H`.
    pub fn token<H>(&self, id: &Identifier) -> Option<HookToken<H>>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        self.hooks
            .get(id)
            .and_then(|hook| hook.typed.downcast_ref::<HookToken<H>>())
            .cloned()
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.hooks.contains_key(id)
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Iterates hooks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DynHook>> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|hook| (hook.id(), hook.strategy())))
            .finish()
    }
}
