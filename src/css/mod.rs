// Style cascade: values, selectors, rule sets, and the resolver
mod resolver;
mod selector;
mod stylesheet;
mod values;

pub use self::resolver::StyleResolver;
pub use self::selector::Selector;
pub use self::stylesheet::{Rule, RuleDef, Stylesheet};
pub use self::values::{StyleMap, StyleValue, style_map};

use std::error::Error;
use std::fmt;

/// Errors raised by rule-set loading and cascade application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The selector was empty or contained only whitespace
    InvalidSelector(String),
    /// The document is not an acyclic single-rooted tree
    InvalidTree,
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::InvalidSelector(text) => {
                write!(
                    f,
                    "invalid selector {:?}: expected at least one type token",
                    text
                )
            }
            StyleError::InvalidTree => {
                write!(f, "document tree has a cycle or a broken parent link")
            }
        }
    }
}

impl Error for StyleError {}
