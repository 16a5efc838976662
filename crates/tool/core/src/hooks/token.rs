//! Typed hook tokens and their merge configuration.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use super::merge::{MergeAll, MergeAny, MergeCompose};
use super::object::{ErasedImpl, HookObject};
use crate::id::Identifier;

/// Combines several implementations of one hook into a single implementation.
///
/// Receives implementations in priority order (highest first); never called
/// with fewer than two.
pub type MergeFn<H> = fn(Vec<Arc<H>>) -> Arc<H>;

/// How a hook resolves multiple implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MergeStrategy {
    /// Single owner; two implementations is a configuration error.
    Exclusive,
    /// Short-circuits on the first implementation that reports success.
    Any,
    /// Invokes every implementation in priority order.
    All,
    /// Feeds the output of each implementation into the next.
    Compose,
    /// Hook-specific merge function.
    Custom,
}

impl MergeStrategy {
    /// Returns true if the strategy accepts more than one implementation.
    pub const fn is_mergeable(&self) -> bool {
        !matches!(self, Self::Exclusive)
    }
}

/// Merge configuration stored in a hook definition.
pub struct Merger<H: ?Sized> {
    strategy: MergeStrategy,
    merge: Option<MergeFn<H>>,
}

impl<H: ?Sized> Merger<H> {
    pub const fn exclusive() -> Self {
        Self {
            strategy: MergeStrategy::Exclusive,
            merge: None,
        }
    }

    pub fn all() -> Self
    where
        H: MergeAll,
    {
        Self {
            strategy: MergeStrategy::All,
            merge: Some(H::merge_all),
        }
    }

    pub fn any() -> Self
    where
        H: MergeAny,
    {
        Self {
            strategy: MergeStrategy::Any,
            merge: Some(H::merge_any),
        }
    }

    pub fn compose() -> Self
    where
        H: MergeCompose,
    {
        Self {
            strategy: MergeStrategy::Compose,
            merge: Some(H::merge_compose),
        }
    }

    pub const fn custom(merge: MergeFn<H>) -> Self {
        Self {
            strategy: MergeStrategy::Custom,
            merge: Some(merge),
        }
    }

    pub fn strategy(&self) -> MergeStrategy {
        self.strategy
    }
}

impl<H: ?Sized> Clone for Merger<H> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            merge: self.merge,
        }
    }
}

/// Everything the engine knows about one hook.
pub(crate) struct HookDefinition<H: ?Sized> {
    id: Identifier,
    default: Arc<H>,
    merger: Merger<H>,
}

impl<H: ?Sized> HookDefinition<H> {
    pub(crate) fn new(id: Identifier, default: Arc<H>, merger: Merger<H>) -> Self {
        Self {
            id,
            default,
            merger,
        }
    }
}

/// Phantom-typed handle to a registered hook.
///
/// `H` is the hook contract, usually a trait object such as
/// `dyn ToolStatsHook`. Lookups through a token return `Arc<H>` directly, so
/// callers never cast.
pub struct HookToken<H: ?Sized> {
    definition: Arc<HookDefinition<H>>,
}

impl<H: ?Sized> HookToken<H> {
    pub(crate) fn from_definition(definition: Arc<HookDefinition<H>>) -> Self {
        Self { definition }
    }

    pub fn id(&self) -> &Identifier {
        &self.definition.id
    }

    /// Implementation used when nothing registered for this hook.
    pub fn default_hook(&self) -> &Arc<H> {
        &self.definition.default
    }

    pub fn strategy(&self) -> MergeStrategy {
        self.definition.merger.strategy
    }

    /// Merges implementations already sorted by priority.
    ///
    /// Returns `None` for exclusive hooks given more than one implementation.
    pub fn merge(&self, mut hooks: Vec<Arc<H>>) -> Option<Arc<H>> {
        match (hooks.len(), self.definition.merger.merge) {
            (0, _) => Some(Arc::clone(&self.definition.default)),
            (1, _) => hooks.pop(),
            (_, Some(merge)) => Some(merge(hooks)),
            (_, None) => None,
        }
    }
}

impl<H: ?Sized> HookToken<H>
where
    H: Send + Sync + 'static,
{
    pub(crate) fn erased(&self) -> Arc<dyn DynHook> {
        Arc::clone(&self.definition) as Arc<dyn DynHook>
    }
}

impl<H: ?Sized> Clone for HookToken<H> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
        }
    }
}

impl<H: ?Sized> PartialEq for HookToken<H> {
    fn eq(&self, other: &Self) -> bool {
        self.definition.id == other.definition.id
    }
}

impl<H: ?Sized> Eq for HookToken<H> {}

impl<H: ?Sized> fmt::Debug for HookToken<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookToken")
            .field("id", &self.definition.id)
            .field("contract", &type_name::<H>())
            .field("strategy", &self.definition.merger.strategy)
            .finish()
    }
}

/// Type-erased view of a hook definition.
///
/// Used by data-driven registration, where the hook is only known by its
/// identity and the contract has to be checked at runtime.
pub trait DynHook: Send + Sync {
    fn id(&self) -> &Identifier;

    /// Name of the contract type, for diagnostics.
    fn contract(&self) -> &'static str;

    fn strategy(&self) -> MergeStrategy;

    /// Returns true if `object` provides an implementation of this hook's
    /// contract.
    fn is_valid(&self, object: &HookObject) -> bool;

    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn extract(&self, object: &HookObject) -> Option<ErasedImpl>;

    #[doc(hidden)]
    fn merge_erased(&self, values: Vec<ErasedImpl>) -> Option<ErasedImpl>;
}

impl<H: ?Sized + Send + Sync + 'static> DynHook for HookDefinition<H> {
    fn id(&self) -> &Identifier {
        &self.id
    }

    fn contract(&self) -> &'static str {
        type_name::<H>()
    }

    fn strategy(&self) -> MergeStrategy {
        self.merger.strategy
    }

    fn is_valid(&self, object: &HookObject) -> bool {
        object.implements::<H>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn extract(&self, object: &HookObject) -> Option<ErasedImpl> {
        object
            .facet::<H>()
            .map(|hook| Box::new(hook) as ErasedImpl)
    }

    fn merge_erased(&self, values: Vec<ErasedImpl>) -> Option<ErasedImpl> {
        let merge = self.merger.merge?;
        let hooks = values
            .into_iter()
            .map(|value| value.downcast::<Arc<H>>().map(|hook| *hook))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        Some(Box::new(merge(hooks)))
    }
}
