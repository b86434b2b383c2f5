//! Instrument identification.
//!
//! The harness keys books and positions by product symbol. `Symbol` is
//! ordered and hashable so per-tick output iterates deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument identifier (e.g. "KELP").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::from("KELP").to_string(), "KELP");
    }

    #[test]
    fn test_symbol_ordering() {
        let mut symbols = vec![Symbol::from("B"), Symbol::from("A")];
        symbols.sort();
        assert_eq!(symbols[0].as_str(), "A");
    }
}
