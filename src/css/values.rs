// Style value types shared by the cascade and the renderer
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A single style property value
///
/// Values are either bare numbers (`size: 25`) or keywords (`color: green`).
/// Scene files carry them as plain JSON numbers and strings, hence the
/// untagged serde form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(i64),
    Keyword(SmolStr),
}

/// Property name to value mapping for one node
pub type StyleMap = FxHashMap<SmolStr, StyleValue>;

impl StyleValue {
    /// Keyword text, if this value is a keyword
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(k) => Some(k.as_str()),
            StyleValue::Number(_) => None,
        }
    }

    /// Numeric value, if this value is a number
    pub fn as_number(&self) -> Option<i64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Keyword(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Keyword(k) => write!(f, "{}", k),
        }
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Keyword(SmolStr::new(s))
    }
}

/// Build a style map from (property, value) pairs
pub fn style_map<'a, I>(pairs: I) -> StyleMap
where
    I: IntoIterator<Item = (&'a str, StyleValue)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (SmolStr::new(k), v))
        .collect()
}
