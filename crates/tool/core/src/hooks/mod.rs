//! Typed hook tokens, the hook registry and per-build hook maps.
//!
//! A hook is a named extension point with a contract `H` (a trait object
//! type), a default implementation and a merge strategy. Modules implement
//! contracts; a [`ModifierHookMapBuilder`] collects the implementations of
//! every active modifier and freezes them into a [`ModifierHookMap`], which
//! gameplay code queries with typed tokens.
//!
//! # Registration
//!
//! ```text
//! HookRegistry::register*  ──>  HookToken<H>        (typed, startup only)
//!                               DynHook             (by identity, content)
//! ```
//!
//! # Resolution
//!
//! Implementations registered for one hook are ordered by contributor
//! priority (descending, ties by modifier id) and then:
//! - one implementation is stored as is
//! - several are merged with the hook's merge function
//! - several without a merge function fail with [`HookError::AmbiguousHook`]

mod contracts;
mod error;
mod map;
mod merge;
mod object;
mod registry;
mod token;

pub use contracts::{
    CapacityHook, HarvestTierHook, InteractionHook, InteractionResult, MeleeDamageHook,
    ModifierHooks, SummedCapacity, ToolActionHook, ToolDamageHook, ToolStatsHook,
    VolatileDataHook, sum_capacity,
};
pub use error::HookError;
pub use map::{Contributor, ModifierHookMap, ModifierHookMapBuilder};
pub use merge::{AllMerger, AnyMerger, ComposeMerger, MergeAll, MergeAny, MergeCompose};
pub use object::{ErasedImpl, HookObject};
pub use registry::HookRegistry;
pub use token::{DynHook, HookToken, MergeFn, MergeStrategy, Merger};
