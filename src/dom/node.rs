// Element nodes and their bookkeeping flags
use super::NodeId;
use super::events::HandlerSlot;
use crate::css::StyleMap;
use bitflags::bitflags;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// The effective style has not been recomputed since the last
        /// own-style mutation
        const STYLE_DIRTY = 0b00000001;
        /// At least one handler was ever registered on this node
        const HAS_HANDLERS = 0b00000010;
    }
}

impl NodeFlags {
    #[inline]
    pub fn is_style_dirty(&self) -> bool {
        self.contains(NodeFlags::STYLE_DIRTY)
    }

    #[inline]
    pub fn has_handlers(&self) -> bool {
        self.contains(NodeFlags::HAS_HANDLERS)
    }
}

/// A node in the element tree
///
/// Nodes live in the document's arena and refer to each other by id. The
/// parent link is assigned exactly once, when the node is attached; the
/// attach guards on [`Document::append_child`](super::Document::append_child)
/// keep the parent chains loop-free.
pub struct Element {
    pub(crate) parent: Option<NodeId>,
    /// Child ids in construction order
    pub(crate) children: Vec<NodeId>,
    /// Type tag, immutable after construction
    tag: SmolStr,
    /// Author-declared inline style; always wins the cascade
    pub(crate) own_style: StyleMap,
    /// Cascade output; stale whenever STYLE_DIRTY is set
    pub(crate) effective_style: StyleMap,
    /// Event name to handler slot; a disabled slot behaves exactly like a
    /// missing one during dispatch
    pub(crate) handlers: FxHashMap<SmolStr, HandlerSlot>,
    /// Text payload, assigned by callers or defaulted by type
    pub(crate) content: String,
    pub(crate) flags: NodeFlags,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            tag: SmolStr::new(tag),
            own_style: StyleMap::default(),
            effective_style: StyleMap::default(),
            handlers: FxHashMap::default(),
            content: String::new(),
            flags: NodeFlags::STYLE_DIRTY,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn own_style(&self) -> &StyleMap {
        &self.own_style
    }

    pub fn effective_style(&self) -> &StyleMap {
        &self.effective_style
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }
}
