//! Generic merged-hook containers.
//!
//! A hook contract opts into a merge strategy by implementing its trait for
//! the matching container, e.g. `impl ToolStatsHook for AllMerger<dyn
//! ToolStatsHook>`, and then implementing [`MergeAll`] (or the `Any` /
//! `Compose` counterparts) for the trait object.

use std::fmt;
use std::sync::Arc;

/// Contracts whose implementations can all be invoked in order.
pub trait MergeAll {
    fn merge_all(hooks: Vec<Arc<Self>>) -> Arc<Self>;
}

/// Contracts where the first successful implementation wins.
pub trait MergeAny {
    fn merge_any(hooks: Vec<Arc<Self>>) -> Arc<Self>;
}

/// Contracts whose implementations transform a value in sequence.
pub trait MergeCompose {
    fn merge_compose(hooks: Vec<Arc<Self>>) -> Arc<Self>;
}

macro_rules! merger_container {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<H: ?Sized> {
            hooks: Vec<Arc<H>>,
        }

        impl<H: ?Sized> $name<H> {
            pub fn new(hooks: Vec<Arc<H>>) -> Self {
                Self { hooks }
            }

            /// Implementations in invocation order.
            pub fn hooks(&self) -> &[Arc<H>] {
                &self.hooks
            }

            pub fn len(&self) -> usize {
                self.hooks.len()
            }

            pub fn is_empty(&self) -> bool {
                self.hooks.is_empty()
            }
        }

        impl<H: ?Sized> fmt::Debug for $name<H> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("hooks", &self.hooks.len())
                    .finish()
            }
        }
    };
}

merger_container!(
    /// Invokes every wrapped implementation in priority order.
    ///
    /// Empty, it is a no-op.
    AllMerger
);

merger_container!(
    /// Returns the first success among the wrapped implementations and skips
    /// the rest.
    ///
    /// Empty, it reports failure.
    AnyMerger
);

merger_container!(
    /// Passes the running value through each wrapped implementation.
    ///
    /// Empty, it is the identity.
    ComposeMerger
);
