// Element tree: the document handle, traversal, and diagnostics
mod builder;
mod events;
mod node;

pub use self::builder::{ContentProvider, ElementDef, PlaceholderContent, TreeBuilder};
pub use self::events::{Event, EventHandler};
pub use self::node::{Element, NodeFlags};

use crate::css::{StyleMap, StyleValue};
use slab::Slab;
use smol_str::SmolStr;
use std::error::Error;
use std::fmt;

/// Index of a node in its document's arena
pub type NodeId = usize;

/// Errors raised by tree construction and handler registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node already has a parent
    AlreadyAttached(NodeId),
    /// The root cannot be attached below another node
    CannotAttachRoot,
    /// A node cannot become its own child
    AttachToSelf(NodeId),
    /// The chosen parent sits inside the node's own subtree
    AttachToDescendant(NodeId),
    /// The event name was empty or whitespace-only
    InvalidHandler(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::AlreadyAttached(id) => {
                write!(f, "node {} is already attached to a parent", id)
            }
            DomError::CannotAttachRoot => {
                write!(f, "the root cannot be attached below another node")
            }
            DomError::AttachToSelf(id) => {
                write!(f, "node {} cannot become its own child", id)
            }
            DomError::AttachToDescendant(id) => {
                write!(f, "node {} cannot be attached below its own descendant", id)
            }
            DomError::InvalidHandler(name) => {
                write!(f, "invalid event name {:?}: expected a non-blank name", name)
            }
        }
    }
}

impl Error for DomError {}

/// An element tree with arena-backed node storage
///
/// The document is an explicit handle passed to every operation, so
/// independent trees can coexist and nothing lives in globals. Node ids are
/// arena indices and stay valid for the document's lifetime; nodes are
/// never deleted individually.
pub struct Document {
    nodes: Slab<Element>,
    root: NodeId,
}

impl Document {
    /// Create a document holding only a root element
    pub fn new(root_tag: &str) -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(Element::new(root_tag));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element; attach it with [`Document::append_child`]
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Element::new(tag))
    }

    /// Attach a detached element as the last child of `parent`
    ///
    /// Parent links are assigned here and never reassigned. Re-attaching a
    /// node, attaching the root, self-attachment, and attaching a node
    /// below its own descendant are all rejected, so a parent chain can
    /// never loop. Nothing is mutated on rejection.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if child == self.root {
            return Err(DomError::CannotAttachRoot);
        }
        if parent == child {
            return Err(DomError::AttachToSelf(child));
        }
        if self.nodes[child].parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        // a detached node heads its own component; if the chosen parent
        // lies below it, this attach would close the parent chain
        let mut cursor = self.nodes[parent].parent;
        while let Some(id) = cursor {
            if id == child {
                return Err(DomError::AttachToDescendant(child));
            }
            cursor = self.nodes[id].parent;
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Borrow a node
    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id]
    }

    pub fn tag(&self, id: NodeId) -> &str {
        self.nodes[id].tag()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn content(&self, id: NodeId) -> &str {
        &self.nodes[id].content
    }

    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) {
        self.nodes[id].content = content.into();
    }

    pub fn own_style(&self, id: NodeId) -> &StyleMap {
        &self.nodes[id].own_style
    }

    /// Set one own-style property
    ///
    /// The cascade must run again before the effective styles reflect the
    /// change. Descendants inherit through this node, so the whole subtree
    /// is marked stale, not just the node itself.
    pub fn set_own_style(&mut self, id: NodeId, property: &str, value: StyleValue) {
        self.nodes[id].own_style.insert(SmolStr::new(property), value);
        self.mark_subtree_dirty(id);
    }

    /// Replace the node's whole own style
    pub fn set_own_styles(&mut self, id: NodeId, style: StyleMap) {
        self.nodes[id].own_style = style;
        self.mark_subtree_dirty(id);
    }

    /// Flag a node and every descendant as awaiting a cascade pass
    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id];
            node.flags.insert(NodeFlags::STYLE_DIRTY);
            stack.extend(node.children.iter().copied());
        }
    }

    /// The node's effective style as of the last cascade application
    ///
    /// Always the latest cascade output, never a construction-time
    /// snapshot. A stale read (an own style changed on this node or an
    /// ancestor with no cascade since) is answered but logged, because the
    /// value no longer matches the inputs.
    pub fn full_style(&self, id: NodeId) -> &StyleMap {
        let node = &self.nodes[id];
        if node.flags.is_style_dirty() {
            tracing::warn!(
                "Reading stale effective style of <{}> (node {})",
                node.tag(),
                id
            );
        }
        &node.effective_style
    }

    /// Single-property accessor over the effective style
    pub fn style_value(&self, id: NodeId, property: &str) -> Option<&StyleValue> {
        self.full_style(id).get(property)
    }

    /// First node with the given tag in pre-order, if any
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root).find(|&id| self.tag(id) == tag)
    }

    /// Iterate a subtree in pre-order, starting node included
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![from],
        }
    }

    /// Walk parent links upward from a node, starting node excluded
    pub fn ancestors(&self, from: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: self.nodes[from].parent,
        }
    }

    /// Lazy pre-order listing of (depth, tag, effective style)
    ///
    /// Purely a read; every call returns a fresh, restartable iterator.
    pub fn style_hierarchy(&self) -> StyleHierarchy<'_> {
        StyleHierarchy {
            doc: self,
            stack: vec![(self.root, 0)],
        }
    }

    pub(crate) fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        std::mem::take(&mut self.nodes[id].children)
    }

    pub(crate) fn restore_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id].children = children;
    }

    pub(crate) fn store_effective_style(&mut self, id: NodeId, style: StyleMap) {
        let node = &mut self.nodes[id];
        node.effective_style = style;
        node.flags.remove(NodeFlags::STYLE_DIRTY);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id]
    }
}

#[cfg(test)]
impl Document {
    /// Break the single-parent invariant, for defensive-check tests
    pub(crate) fn corrupt_parent(&mut self, node: NodeId, parent: NodeId) {
        self.nodes[node].parent = Some(parent);
    }

    /// Bypass the append guards, for defensive-check tests
    pub(crate) fn push_child_unchecked(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].children.push(child);
    }
}

/// Pre-order subtree iterator
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // push in reverse so the leftmost child pops first
        for &child in self.doc.nodes[id].children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Upward parent-chain iterator
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.doc.nodes[id].parent;
        Some(id)
    }
}

/// Iterator behind [`Document::style_hierarchy`]
pub struct StyleHierarchy<'a> {
    doc: &'a Document,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for StyleHierarchy<'a> {
    type Item = (usize, &'a str, &'a StyleMap);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let doc = self.doc;
        let node = &doc.nodes[id];
        for &child in node.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((depth, node.tag(), &node.effective_style))
    }
}
