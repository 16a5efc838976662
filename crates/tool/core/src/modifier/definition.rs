use std::fmt;
use std::sync::Arc;

use crate::hooks::{Contributor, HookError, HookRegistry, ModifierHookMapBuilder};
use crate::id::Identifier;

use super::{ModifierEntry, ModifierError, ModifierId, ModifierModule};

/// A module inside a modifier, optionally registered under an explicit hook
/// list instead of the module's defaults.
#[derive(Clone)]
pub struct ModuleEntry {
    pub module: Arc<dyn ModifierModule>,
    pub hooks: Option<Vec<Identifier>>,
}

impl ModuleEntry {
    pub fn hooks(&self) -> &[Identifier] {
        self.hooks
            .as_deref()
            .unwrap_or_else(|| self.module.default_hooks())
    }
}

impl fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("module", &self.module)
            .field("hooks", &self.hooks())
            .finish()
    }
}

/// A named, immutable behavior definition made of modules.
#[derive(Clone, Debug)]
pub struct Modifier {
    id: ModifierId,
    priority: i32,
    modules: Vec<ModuleEntry>,
}

impl Modifier {
    pub fn new(id: ModifierId, priority: i32) -> Self {
        Self {
            id,
            priority,
            modules: Vec::new(),
        }
    }

    /// Adds a module registered under its default hooks.
    #[must_use]
    pub fn with_module(mut self, module: impl ModifierModule + 'static) -> Self {
        self.modules.push(ModuleEntry {
            module: Arc::new(module),
            hooks: None,
        });
        self
    }

    /// Adds a module registered under `hooks` instead of its defaults.
    ///
    /// The hook list is checked against the bound module when the hook map
    /// is built.
    #[must_use]
    pub fn with_module_hooks(
        mut self,
        module: impl ModifierModule + 'static,
        hooks: Vec<Identifier>,
    ) -> Self {
        self.modules.push(ModuleEntry {
            module: Arc::new(module),
            hooks: Some(hooks),
        });
        self
    }

    /// Adds an already shared module.
    #[must_use]
    pub fn with_module_entry(mut self, entry: ModuleEntry) -> Self {
        self.modules.push(entry);
        self
    }

    pub fn id(&self) -> &ModifierId {
        &self.id
    }

    /// Higher priorities contribute first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// Registers every module of this modifier, bound to `entry`.
    ///
    /// # Errors
    ///
    /// Fails if a listed hook is unknown or a module does not implement the
    /// contract of a hook it is listed under.
    pub fn register_hooks(
        &self,
        entry: &ModifierEntry,
        builder: &mut ModifierHookMapBuilder<'_>,
    ) -> Result<(), HookError> {
        for module in &self.modules {
            let contributor =
                Contributor::new(self.id.clone(), self.priority, module.module.name());
            match &module.hooks {
                None => {
                    builder.add_module(&contributor, entry, module.module.as_ref())?;
                }
                Some(hooks) => {
                    let object = module.module.bind(entry);
                    for hook in hooks {
                        builder.add_hook_checked(&contributor, &object, hook, |err| err)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Checks the modifier on its own by building a hook map at level one.
    ///
    /// Catches unknown hooks, contract mismatches and two of its own modules
    /// claiming one exclusive hook.
    pub fn validate(&self, registry: &HookRegistry) -> Result<(), ModifierError> {
        let entry = ModifierEntry::new(self.id.clone(), 1);
        let mut builder = ModifierHookMapBuilder::new(registry);
        self.register_hooks(&entry, &mut builder)
            .and_then(|()| builder.build().map(drop))
            .map_err(|source| ModifierError::InvalidHooks {
                modifier: self.id.clone(),
                source,
            })
    }
}
