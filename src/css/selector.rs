// Selector parsing and matching
use super::StyleError;
use crate::dom::{Document, NodeId};
use smallvec::SmallVec;
use smol_str::SmolStr;
use std::fmt;

/// A rule selector: one or more whitespace-separated type tokens
///
/// The last token names the target type. Any preceding tokens form a
/// required ancestor path, outermost first: `"body section"` matches a
/// `section` with a `body` anywhere above it on the root-to-node chain,
/// not only as the immediate parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tokens: SmallVec<[SmolStr; 4]>,
}

impl Selector {
    /// Parse a selector string
    ///
    /// Empty or whitespace-only input is rejected; surrounding whitespace
    /// is otherwise insignificant.
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        let tokens: SmallVec<[SmolStr; 4]> =
            text.split_whitespace().map(SmolStr::new).collect();

        if tokens.is_empty() {
            return Err(StyleError::InvalidSelector(text.to_string()));
        }

        Ok(Self { tokens })
    }

    /// The type this selector targets (its last token)
    pub fn target(&self) -> &str {
        // parse guarantees at least one token
        self.tokens[self.tokens.len() - 1].as_str()
    }

    /// Ancestor path tokens, outermost first; empty for type-only selectors
    pub fn ancestor_path(&self) -> &[SmolStr] {
        &self.tokens[..self.tokens.len() - 1]
    }

    /// Token count; longer paths are more specific and override shorter ones
    pub fn specificity(&self) -> u32 {
        self.tokens.len() as u32
    }

    /// Check whether this selector matches a node in the document
    ///
    /// The target token must equal the node's tag; the ancestor path is then
    /// matched innermost-first against the upward parent chain, allowing any
    /// distance between consecutive matches.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if doc.tag(node) != self.target() {
            return false;
        }

        let mut path = self.ancestor_path().iter().rev();
        let mut want = path.next();
        let mut current = doc.parent(node);

        while let (Some(token), Some(id)) = (want, current) {
            if doc.tag(id) == token.as_str() {
                want = path.next();
            }
            current = doc.parent(id);
        }

        want.is_none()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
