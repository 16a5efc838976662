//! Per-build hook tables.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::object::{ErasedImpl, HookObject};
use super::token::{DynHook, HookToken};
use super::{HookError, HookRegistry};
use crate::id::Identifier;
use crate::modifier::{ModifierEntry, ModifierModule};

/// The modifier module that registered a hook implementation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Contributor {
    /// Modifier that owns the module.
    pub source: Identifier,
    /// Higher priorities are merged first.
    pub priority: i32,
    /// Module name within the modifier.
    pub module: String,
}

impl Contributor {
    pub fn new(source: Identifier, priority: i32, module: impl Into<String>) -> Self {
        Self {
            source,
            priority,
            module: module.into(),
        }
    }
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} (priority {})",
            self.source, self.module, self.priority
        )
    }
}

struct Registrant {
    contributor: Contributor,
    sequence: usize,
    value: ErasedImpl,
}

struct PendingHook {
    definition: Arc<dyn DynHook>,
    registrants: Vec<Registrant>,
}

/// Collects hook implementations for one rebuild.
///
/// Borrows the hook registry for identity lookups during data-driven
/// registration. Registration order only matters between contributors of
/// equal priority.
pub struct ModifierHookMapBuilder<'r> {
    registry: &'r HookRegistry,
    pending: BTreeMap<Identifier, PendingHook>,
    next_sequence: usize,
}

impl<'r> ModifierHookMapBuilder<'r> {
    pub fn new(registry: &'r HookRegistry) -> Self {
        Self {
            registry,
            pending: BTreeMap::new(),
            next_sequence: 0,
        }
    }

    /// Registers `hook` under each of `tokens`.
    ///
    /// The contract is checked by the compiler, so this cannot fail.
    pub fn add_hook<H>(
        &mut self,
        contributor: &Contributor,
        hook: Arc<H>,
        tokens: &[&HookToken<H>],
    ) -> &mut Self
    where
        H: ?Sized + Send + Sync + 'static,
    {
        for token in tokens {
            let value: ErasedImpl = Box::new(Arc::clone(&hook));
            self.push(token.erased(), contributor, value);
        }
        self
    }

    /// Registers the facet of `object` matching the hook named `hook`.
    ///
    /// Used when hook assignment comes from loaded content. Failures are
    /// mapped through `on_error` so callers can report them in their own
    /// error type.
    pub fn add_hook_checked<E>(
        &mut self,
        contributor: &Contributor,
        object: &HookObject,
        hook: &Identifier,
        on_error: impl FnOnce(HookError) -> E,
    ) -> Result<&mut Self, E> {
        let Some(definition) = self.registry.get(hook) else {
            return Err(on_error(HookError::UnknownHook { hook: hook.clone() }));
        };

        let value = definition
            .is_valid(object)
            .then(|| definition.extract(object))
            .flatten();
        let Some(value) = value else {
            return Err(on_error(HookError::InvalidModuleForHook {
                object: object.name().to_string(),
                hook: hook.clone(),
                contract: definition.contract(),
            }));
        };

        let definition = Arc::clone(definition);
        self.push(definition, contributor, value);
        Ok(self)
    }

    /// Binds `module` to `entry` and registers it under every hook the module
    /// declares by default.
    ///
    /// # Errors
    ///
    /// Fails if a declared hook is unknown or the bound module does not
    /// implement its contract.
    pub fn add_module(
        &mut self,
        contributor: &Contributor,
        entry: &ModifierEntry,
        module: &dyn ModifierModule,
    ) -> Result<&mut Self, HookError> {
        let object = module.bind(entry);
        for hook in module.default_hooks() {
            self.add_hook_checked(contributor, &object, hook, |err| err)?;
        }
        Ok(self)
    }

    /// Number of hooks with at least one registrant.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&mut self, definition: Arc<dyn DynHook>, contributor: &Contributor, value: ErasedImpl) {
        trace!(
            target: "tool_core::hooks",
            hook = %definition.id(),
            contributor = %contributor,
            "hook registrant added"
        );

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.pending
            .entry(definition.id().clone())
            .or_insert_with(|| PendingHook {
                definition,
                registrants: Vec::new(),
            })
            .registrants
            .push(Registrant {
                contributor: contributor.clone(),
                sequence,
                value,
            });
    }

    /// Resolves every hook and freezes the result.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::AmbiguousHook`] if a hook without a merge function
    /// has more than one registrant.
    pub fn build(self) -> Result<ModifierHookMap, HookError> {
        let mut hooks = HashMap::with_capacity(self.pending.len());

        for (id, pending) in self.pending {
            let PendingHook {
                definition,
                mut registrants,
            } = pending;

            // Ties break on the owning modifier id, so the order modifiers are
            // requested in never reaches the merge. Modules of one modifier
            // keep their declared order.
            registrants.sort_by(|a, b| {
                b.contributor
                    .priority
                    .cmp(&a.contributor.priority)
                    .then_with(|| a.contributor.source.cmp(&b.contributor.source))
                    .then(a.sequence.cmp(&b.sequence))
            });

            let (contributors, values): (Vec<_>, Vec<_>) = registrants
                .into_iter()
                .map(|r| (r.contributor, r.value))
                .unzip();

            let value = if values.len() == 1 {
                values.into_iter().next()
            } else {
                debug!(
                    target: "tool_core::hooks",
                    hook = %id,
                    strategy = %definition.strategy(),
                    count = values.len(),
                    "merging hook implementations"
                );
                definition.merge_erased(values)
            };

            let Some(value) = value else {
                return Err(HookError::AmbiguousHook {
                    hook: id,
                    contributors: contributors.iter().map(ToString::to_string).collect(),
                });
            };

            hooks.insert(
                id,
                ResolvedHook {
                    value,
                    contributors,
                },
            );
        }

        debug!(
            target: "tool_core::hooks",
            hooks = hooks.len(),
            "hook map built"
        );

        Ok(ModifierHookMap { hooks })
    }
}

struct ResolvedHook {
    value: ErasedImpl,
    contributors: Vec<Contributor>,
}

/// Immutable table from hook identity to its resolved implementation.
#[derive(Default)]
pub struct ModifierHookMap {
    hooks: HashMap<Identifier, ResolvedHook>,
}

impl ModifierHookMap {
    /// A map with no implementations; every lookup falls back to defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the implementation registered for `token`, if any.
    pub fn get<H>(&self, token: &HookToken<H>) -> Option<&Arc<H>>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        self.hooks
            .get(token.id())
            .and_then(|hook| hook.value.downcast_ref::<Arc<H>>())
    }

    /// Returns the implementation for `token`, or the token's default.
    pub fn get_or_default<'a, H>(&'a self, token: &'a HookToken<H>) -> &'a Arc<H>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        self.get(token).unwrap_or_else(|| token.default_hook())
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.hooks.contains_key(id)
    }

    /// Contributors for a hook, in merge order.
    pub fn contributors(&self, id: &Identifier) -> &[Contributor] {
        self.hooks
            .get(id)
            .map(|hook| hook.contributors.as_slice())
            .unwrap_or_default()
    }

    /// Hook identities with an implementation, sorted.
    pub fn hook_ids(&self) -> Vec<&Identifier> {
        let mut ids: Vec<_> = self.hooks.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for ModifierHookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.hook_ids()
                    .into_iter()
                    .map(|id| (id, self.contributors(id).len())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::hooks::{AllMerger, ComposeMerger, MergeAll, MergeCompose};

    trait Record: Send + Sync {
        fn record(&self, log: &Mutex<Vec<&'static str>>);
    }

    struct Named(&'static str);

    impl Record for Named {
        fn record(&self, log: &Mutex<Vec<&'static str>>) {
            log.lock().unwrap().push(self.0);
        }
    }

    impl Record for AllMerger<dyn Record> {
        fn record(&self, log: &Mutex<Vec<&'static str>>) {
            for hook in self.hooks() {
                hook.record(log);
            }
        }
    }

    impl MergeAll for dyn Record {
        fn merge_all(hooks: Vec<Arc<Self>>) -> Arc<Self> {
            Arc::new(AllMerger::new(hooks))
        }
    }

    trait Transform: Send + Sync {
        fn apply(&self, value: i64) -> i64;
    }

    struct Add(i64);
    struct Double;

    impl Transform for Add {
        fn apply(&self, value: i64) -> i64 {
            value + self.0
        }
    }

    impl Transform for Double {
        fn apply(&self, value: i64) -> i64 {
            value * 2
        }
    }

    impl Transform for ComposeMerger<dyn Transform> {
        fn apply(&self, value: i64) -> i64 {
            self.hooks().iter().fold(value, |acc, hook| hook.apply(acc))
        }
    }

    impl MergeCompose for dyn Transform {
        fn merge_compose(hooks: Vec<Arc<Self>>) -> Arc<Self> {
            Arc::new(ComposeMerger::new(hooks))
        }
    }

    trait Owner: Send + Sync {
        fn owner(&self) -> &'static str;
    }

    impl Owner for Named {
        fn owner(&self) -> &'static str {
            self.0
        }
    }

    const RECORD: Identifier = Identifier::from_static("test", "record");
    const TRANSFORM: Identifier = Identifier::from_static("test", "transform");
    const OWNER: Identifier = Identifier::from_static("test", "owner");

    struct Tokens {
        registry: HookRegistry,
        record: HookToken<dyn Record>,
        transform: HookToken<dyn Transform>,
        owner: HookToken<dyn Owner>,
    }

    fn tokens() -> Tokens {
        let mut registry = HookRegistry::new();
        let record = registry.register_all::<dyn Record>(RECORD).unwrap();
        let transform = registry.register_compose::<dyn Transform>(TRANSFORM).unwrap();
        let owner = registry
            .register_exclusive::<dyn Owner>(OWNER, Arc::new(Named("nobody")))
            .unwrap();
        Tokens {
            registry,
            record,
            transform,
            owner,
        }
    }

    fn contributor(name: &'static str, priority: i32) -> Contributor {
        Contributor::new(Identifier::from_static("test", name), priority, name)
    }

    fn recorded(map: &ModifierHookMap, token: &HookToken<dyn Record>) -> Vec<&'static str> {
        let log = Mutex::new(Vec::new());
        map.get_or_default(token).record(&log);
        log.into_inner().unwrap()
    }

    #[test]
    fn empty_map_uses_token_defaults() {
        let t = tokens();
        let map = ModifierHookMapBuilder::new(&t.registry).build().unwrap();

        assert!(map.is_empty());
        assert!(recorded(&map, &t.record).is_empty());
        assert_eq!(map.get_or_default(&t.transform).apply(7), 7);
        assert_eq!(map.get_or_default(&t.owner).owner(), "nobody");
    }

    #[test]
    fn all_merger_invokes_every_contributor_by_priority() {
        let t = tokens();
        let mut builder = ModifierHookMapBuilder::new(&t.registry);
        builder
            .add_hook::<dyn Record>(
                &contributor("low", 10),
                Arc::new(Named("low")),
                &[&t.record],
            )
            .add_hook::<dyn Record>(
                &contributor("high", 90),
                Arc::new(Named("high")),
                &[&t.record],
            )
            .add_hook::<dyn Record>(
                &contributor("mid", 50),
                Arc::new(Named("mid")),
                &[&t.record],
            );
        let map = builder.build().unwrap();

        assert_eq!(recorded(&map, &t.record), vec!["high", "mid", "low"]);
        let order: Vec<_> = map
            .contributors(&RECORD)
            .iter()
            .map(|c| c.module.as_str())
            .collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn equal_priorities_order_by_modifier_not_insertion() {
        let t = tokens();

        let mut forward = ModifierHookMapBuilder::new(&t.registry);
        forward
            .add_hook::<dyn Record>(
                &contributor("beta", 5),
                Arc::new(Named("beta")),
                &[&t.record],
            )
            .add_hook::<dyn Record>(
                &contributor("alpha", 5),
                Arc::new(Named("alpha")),
                &[&t.record],
            );

        let mut reverse = ModifierHookMapBuilder::new(&t.registry);
        reverse
            .add_hook::<dyn Record>(
                &contributor("alpha", 5),
                Arc::new(Named("alpha")),
                &[&t.record],
            )
            .add_hook::<dyn Record>(
                &contributor("beta", 5),
                Arc::new(Named("beta")),
                &[&t.record],
            );

        let forward = forward.build().unwrap();
        let reverse = reverse.build().unwrap();
        assert_eq!(recorded(&forward, &t.record), vec!["alpha", "beta"]);
        assert_eq!(recorded(&reverse, &t.record), vec!["alpha", "beta"]);
    }

    #[test]
    fn modules_of_one_modifier_keep_declared_order() {
        let t = tokens();
        let owner = contributor("same", 5);
        let mut builder = ModifierHookMapBuilder::new(&t.registry);
        builder
            .add_hook::<dyn Record>(&owner, Arc::new(Named("second")), &[&t.record])
            .add_hook::<dyn Record>(&owner, Arc::new(Named("first")), &[&t.record]);
        let map = builder.build().unwrap();

        assert_eq!(recorded(&map, &t.record), vec!["second", "first"]);
    }

    #[test]
    fn compose_is_order_sensitive_across_priorities() {
        let t = tokens();

        let mut add_first = ModifierHookMapBuilder::new(&t.registry);
        add_first
            .add_hook::<dyn Transform>(&contributor("add", 20), Arc::new(Add(3)), &[&t.transform])
            .add_hook::<dyn Transform>(
                &contributor("double", 10),
                Arc::new(Double),
                &[&t.transform],
            );
        let add_first = add_first.build().unwrap();

        let mut double_first = ModifierHookMapBuilder::new(&t.registry);
        double_first
            .add_hook::<dyn Transform>(&contributor("add", 10), Arc::new(Add(3)), &[&t.transform])
            .add_hook::<dyn Transform>(
                &contributor("double", 20),
                Arc::new(Double),
                &[&t.transform],
            );
        let double_first = double_first.build().unwrap();

        assert_eq!(add_first.get_or_default(&t.transform).apply(1), 8);
        assert_eq!(double_first.get_or_default(&t.transform).apply(1), 5);
    }

    #[test]
    fn compose_priority_ignores_insertion_order() {
        let t = tokens();

        let mut forward = ModifierHookMapBuilder::new(&t.registry);
        forward
            .add_hook::<dyn Transform>(&contributor("add", 20), Arc::new(Add(3)), &[&t.transform])
            .add_hook::<dyn Transform>(
                &contributor("double", 10),
                Arc::new(Double),
                &[&t.transform],
            );

        let mut reverse = ModifierHookMapBuilder::new(&t.registry);
        reverse
            .add_hook::<dyn Transform>(
                &contributor("double", 10),
                Arc::new(Double),
                &[&t.transform],
            )
            .add_hook::<dyn Transform>(&contributor("add", 20), Arc::new(Add(3)), &[&t.transform]);

        let forward = forward.build().unwrap();
        let reverse = reverse.build().unwrap();
        assert_eq!(
            forward.get_or_default(&t.transform).apply(4),
            reverse.get_or_default(&t.transform).apply(4)
        );
    }

    #[test]
    fn exclusive_hook_with_two_owners_is_ambiguous() {
        let t = tokens();
        let mut builder = ModifierHookMapBuilder::new(&t.registry);
        builder
            .add_hook::<dyn Owner>(
                &contributor("alpha", 1),
                Arc::new(Named("alpha")),
                &[&t.owner],
            )
            .add_hook::<dyn Owner>(
                &contributor("beta", 2),
                Arc::new(Named("beta")),
                &[&t.owner],
            );

        let err = builder.build().unwrap_err();
        let HookError::AmbiguousHook { hook, contributors } = &err else {
            panic!("expected ambiguous hook, got {err:?}");
        };
        assert_eq!(hook, &OWNER);
        assert_eq!(contributors.len(), 2);
        assert!(contributors[0].contains("test:beta"));
        assert!(contributors[1].contains("test:alpha"));

        let message = err.to_string();
        assert!(message.contains("alpha") && message.contains("beta"));
    }

    #[test]
    fn single_exclusive_owner_is_stored_directly() {
        let t = tokens();
        let mut builder = ModifierHookMapBuilder::new(&t.registry);
        builder.add_hook::<dyn Owner>(
            &contributor("alpha", 1),
            Arc::new(Named("alpha")),
            &[&t.owner],
        );
        let map = builder.build().unwrap();

        assert_eq!(map.get(&t.owner).unwrap().owner(), "alpha");
        assert!(map.get(&t.record).is_none());
    }

    #[test]
    fn checked_registration_rejects_missing_contract() {
        let t = tokens();
        let object = HookObject::new("recorder").with::<dyn Record>(Arc::new(Named("r")));
        let mut builder = ModifierHookMapBuilder::new(&t.registry);

        let err = builder
            .add_hook_checked(&contributor("r", 0), &object, &OWNER, |e| e)
            .err()
            .unwrap();
        let HookError::InvalidModuleForHook {
            object,
            hook,
            contract,
        } = err
        else {
            panic!("expected invalid module");
        };
        assert_eq!(object, "recorder");
        assert_eq!(hook, OWNER);
        assert!(contract.contains("Owner"));
    }

    #[test]
    fn checked_registration_maps_errors_through_factory() {
        let t = tokens();
        let object = HookObject::new("recorder");
        let unknown = Identifier::from_static("test", "missing");
        let mut builder = ModifierHookMapBuilder::new(&t.registry);

        let err = builder
            .add_hook_checked(&contributor("r", 0), &object, &unknown, |e| e.to_string())
            .err()
            .unwrap();
        assert_eq!(err, "hook 'test:missing' is not registered");
    }

    #[test]
    fn checked_registration_stores_matching_facet() {
        let t = tokens();
        let object = HookObject::new("recorder").with::<dyn Record>(Arc::new(Named("checked")));
        let mut builder = ModifierHookMapBuilder::new(&t.registry);
        builder
            .add_hook_checked(&contributor("r", 0), &object, &RECORD, |e| e)
            .unwrap();
        let map = builder.build().unwrap();

        assert_eq!(recorded(&map, &t.record), vec!["checked"]);
    }
}
