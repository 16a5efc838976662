//! Namespaced identifiers shared by hooks, stats, modifiers and materials.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A `namespace:path` identifier.
///
/// Identifiers for built-in hooks and stats are `const` values backed by
/// static strings; identifiers parsed from content own their text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Identifier {
    namespace: Cow<'static, str>,
    path: Cow<'static, str>,
}

impl Identifier {
    /// Namespace used when a parsed identifier omits one.
    pub const DEFAULT_NAMESPACE: &'static str = "tool";

    /// Builds an identifier from static parts without validation.
    ///
    /// Only intended for compile-time constants; the caller guarantees the
    /// parts are lowercase and contain no `:`.
    pub const fn from_static(namespace: &'static str, path: &'static str) -> Self {
        Self {
            namespace: Cow::Borrowed(namespace),
            path: Cow::Borrowed(path),
        }
    }

    /// Builds and validates an identifier from owned parts.
    pub fn new(
        namespace: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let namespace = namespace.into();
        let path = path.into();
        validate(&namespace, false)?;
        validate(&path, true)?;
        Ok(Self {
            namespace: Cow::Owned(namespace),
            path: Cow::Owned(path),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn validate(part: &str, allow_slash: bool) -> Result<(), IdentifierError> {
    if part.is_empty() {
        return Err(IdentifierError::Empty);
    }
    match part.chars().find(|&c| {
        !(c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || matches!(c, '_' | '-' | '.')
            || (allow_slash && c == '/'))
    }) {
        Some(c) => Err(IdentifierError::InvalidCharacter {
            value: part.to_string(),
            character: c,
        }),
        None => Ok(()),
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(Self::DEFAULT_NAMESPACE, s),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.to_string()
    }
}

/// Errors produced when parsing an identifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier part must not be empty")]
    Empty,

    #[error("invalid character '{character}' in identifier part '{value}'")]
    InvalidCharacter { value: String, character: char },
}
