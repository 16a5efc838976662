//! Capability bags handed to data-driven hook registration.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A boxed `Arc<H>` for some hook contract `H`.
pub type ErasedImpl = Box<dyn Any + Send + Sync>;

struct Facet {
    contract: &'static str,
    value: ErasedImpl,
}

/// A named object together with every hook contract it implements.
///
/// Modules bind themselves to a modifier entry and return a `HookObject`
/// listing their facets. Registration by hook identity then checks the facet
/// set instead of casting, so a module can only be stored under a hook whose
/// contract it actually provides.
pub struct HookObject {
    name: String,
    facets: HashMap<TypeId, Facet>,
}

impl HookObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: HashMap::new(),
        }
    }

    /// Adds an implementation of contract `H` (builder pattern).
    #[must_use]
    pub fn with<H: ?Sized + Send + Sync + 'static>(mut self, hook: Arc<H>) -> Self {
        self.insert(hook);
        self
    }

    /// Adds an implementation of contract `H`, replacing any previous one.
    pub fn insert<H: ?Sized + Send + Sync + 'static>(&mut self, hook: Arc<H>) {
        self.facets.insert(
            TypeId::of::<Arc<H>>(),
            Facet {
                contract: type_name::<H>(),
                value: Box::new(hook),
            },
        );
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn implements<H: ?Sized + 'static>(&self) -> bool {
        self.facets.contains_key(&TypeId::of::<Arc<H>>())
    }

    /// Returns the implementation of contract `H`, if present.
    pub fn facet<H: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<H>> {
        self.facets
            .get(&TypeId::of::<Arc<H>>())
            .and_then(|facet| facet.value.downcast_ref::<Arc<H>>())
            .map(Arc::clone)
    }

    /// Names of the contracts this object implements, sorted.
    pub fn contracts(&self) -> Vec<&'static str> {
        let mut contracts: Vec<_> = self.facets.values().map(|facet| facet.contract).collect();
        contracts.sort_unstable();
        contracts
    }
}

impl fmt::Debug for HookObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookObject")
            .field("name", &self.name)
            .field("contracts", &self.contracts())
            .finish()
    }
}
