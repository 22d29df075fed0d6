// Style rules and rule sets
use super::{Selector, StyleError};
use super::values::StyleMap;
use serde::{Deserialize, Serialize};

/// A style rule: selector plus property assignments
#[derive(Debug, Clone)]
pub struct Rule {
    pub selector: Selector,
    pub style: StyleMap,
}

/// Serde form of a rule, as carried by scene files
///
/// Declaration order breaks specificity ties, so rule sets serialize as
/// arrays rather than maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    pub selector: String,
    pub style: StyleMap,
}

/// An ordered rule set
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse and append one rule; declaration order is the push order
    pub fn push_rule(&mut self, selector: &str, style: StyleMap) -> Result<(), StyleError> {
        let selector = Selector::parse(selector)?;
        self.rules.push(Rule { selector, style });
        Ok(())
    }

    /// Build a sheet from serde rule definitions
    ///
    /// A definition with an invalid selector is skipped with a warning; the
    /// remaining rules still apply.
    pub fn from_defs<I>(defs: I) -> Self
    where
        I: IntoIterator<Item = RuleDef>,
    {
        let mut sheet = Self::new();
        for RuleDef { selector, style } in defs {
            if let Err(err) = sheet.push_rule(&selector, style) {
                log::warn!("Skipping rule: {}", err);
            }
        }
        sheet
    }

    /// Append another sheet's rules after this one's
    pub fn merge(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }
}
