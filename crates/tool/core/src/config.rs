/// Rebuild limits and tunable defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ToolConfig {
    /// Maximum number of modifier entries a single rebuild accepts.
    pub max_modifiers: usize,

    /// Highest level a modifier entry may carry.
    pub max_level: u32,

    /// Priority given to modifiers whose definition does not declare one.
    /// Higher priorities contribute first.
    pub default_priority: i32,
}

impl ToolConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_MODIFIERS: usize = 50;
    pub const DEFAULT_MAX_LEVEL: u32 = 10;
    pub const DEFAULT_PRIORITY: i32 = 100;

    pub fn new() -> Self {
        Self {
            max_modifiers: Self::DEFAULT_MAX_MODIFIERS,
            max_level: Self::DEFAULT_MAX_LEVEL,
            default_priority: Self::DEFAULT_PRIORITY,
        }
    }

    #[must_use]
    pub fn with_max_modifiers(mut self, max_modifiers: usize) -> Self {
        self.max_modifiers = max_modifiers;
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn with_default_priority(mut self, default_priority: i32) -> Self {
        self.default_priority = default_priority;
        self
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::new()
    }
}
