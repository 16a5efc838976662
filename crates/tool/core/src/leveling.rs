//! Level scaling shared by modules and stat contributions.
//!
//! Modules never derive their own scaling from a raw level; they hold a
//! [`LevelingValue`] (or [`RandomLevelingValue`] for per-use rolls) and compute
//! it against the entry's effective level.

use rand::Rng;

/// `flat + each_level × level`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LevelingValue {
    pub flat: f32,
    pub each_level: f32,
}

impl LevelingValue {
    pub const fn new(flat: f32, each_level: f32) -> Self {
        Self { flat, each_level }
    }

    /// A value that does not change with level.
    pub const fn flat(flat: f32) -> Self {
        Self::new(flat, 0.0)
    }

    /// A value that grows linearly from zero.
    pub const fn each_level(each_level: f32) -> Self {
        Self::new(0.0, each_level)
    }

    pub fn compute(&self, level: f32) -> f32 {
        self.flat + self.each_level * level
    }
}

/// A [`LevelingValue`] plus a random bonus drawn on every computation.
///
/// ```text
/// flat + each_level × level + U[0, 1) × (random_flat + random_each_level × level)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RandomLevelingValue {
    pub flat: f32,
    pub each_level: f32,
    pub random_flat: f32,
    pub random_each_level: f32,
}

impl RandomLevelingValue {
    pub const fn new(flat: f32, each_level: f32, random_flat: f32, random_each_level: f32) -> Self {
        Self {
            flat,
            each_level,
            random_flat,
            random_each_level,
        }
    }

    /// Lowest value `compute` can return at `level`.
    pub fn min(&self, level: f32) -> f32 {
        self.flat + self.each_level * level
    }

    /// Width of the random part at `level`.
    pub fn spread(&self, level: f32) -> f32 {
        self.random_flat + self.random_each_level * level
    }

    pub fn compute<R: Rng + ?Sized>(&self, rng: &mut R, level: f32) -> f32 {
        let spread = self.spread(level);
        if spread == 0.0 {
            return self.min(level);
        }
        self.min(level) + rng.random::<f32>() * spread
    }
}

impl From<LevelingValue> for RandomLevelingValue {
    fn from(value: LevelingValue) -> Self {
        Self::new(value.flat, value.each_level, 0.0, 0.0)
    }
}

/// Normalized intensity of an effect, nominally in `[0, 1]`.
///
/// `1.0` means fully applied; values above one are allowed for over-leveled
/// modifiers but [`effective`] never reports more than one.
///
/// [`effective`]: EffectLevel::effective
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct EffectLevel(f32);

impl EffectLevel {
    pub const FULL: Self = Self(1.0);
    pub const NONE: Self = Self(0.0);

    /// Negative and NaN levels become zero.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        Self(value.max(0.0))
    }

    /// Fraction of an effect affordable with `available` out of `required`.
    ///
    /// Used for capacity-style costs (e.g. partial fluid consumption). A cost
    /// of zero is always fully affordable.
    pub fn partial(available: f32, required: f32) -> Self {
        if required <= 0.0 {
            return Self::FULL;
        }
        Self::new((available / required).clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Best achievable level given `existing` is already applied.
    ///
    /// Never moves backwards and never exceeds one:
    /// `effective(x) >= x` and `effective(effective(x)) == effective(x)`.
    pub fn effective(&self, existing: f32) -> f32 {
        existing.max(self.0.min(1.0))
    }

    /// Computes `value` at this level.
    pub fn scale(&self, value: &LevelingValue) -> f32 {
        value.compute(self.0)
    }
}

impl From<u32> for EffectLevel {
    fn from(level: u32) -> Self {
        Self::new(level as f32)
    }
}
