//! Transform and macro selectors
//!
//! Persisted blueprints encode selectors as strings: `""` passes the value
//! through, `"$name"` names a built-in, and anything else names an external
//! method. The string is decoded once, when the blueprint is built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marks a selector string as naming a built-in
pub const BUILTIN_PREFIX: char = '$';

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    /// Empty selector: the value passes through unchanged (or, for macros, nothing runs)
    #[default]
    Identity,
    /// A built-in registry entry
    BuiltIn(String),
    /// An external method; not supported
    External(String),
}

impl Selector {
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            Selector::Identity
        } else if let Some(name) = s.strip_prefix(BUILTIN_PREFIX) {
            Selector::BuiltIn(name.to_string())
        } else {
            Selector::External(s.to_string())
        }
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        Selector::BuiltIn(name.into())
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Selector::Identity)
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector::parse(s)
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::parse(&s)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Identity => Ok(()),
            Selector::BuiltIn(name) => write!(f, "{}{}", BUILTIN_PREFIX, name),
            Selector::External(name) => write!(f, "{}", name),
        }
    }
}
