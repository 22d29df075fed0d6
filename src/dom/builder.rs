// Tree construction from nested element definitions
use super::{Document, DomError, NodeId};
use serde::{Deserialize, Serialize};

/// Nested element definition, the wire form of a tree
///
/// The serialized shape is `{ "type": "div", "children": [ ... ] }`;
/// leaves omit `children` entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDef {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub children: Vec<ElementDef>,
}

impl ElementDef {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_children(tag: &str, children: Vec<ElementDef>) -> Self {
        Self {
            tag: tag.to_string(),
            children,
        }
    }
}

/// Supplies default text content for freshly built elements, keyed by tag
pub trait ContentProvider {
    fn content_for(&self, tag: &str) -> Option<String>;
}

/// Stock provider: fixed placeholder text for the text-bearing tags
pub struct PlaceholderContent;

impl ContentProvider for PlaceholderContent {
    fn content_for(&self, tag: &str) -> Option<String> {
        match tag {
            "h1" => Some("Placeholder heading".to_string()),
            "p" => Some("Placeholder paragraph".to_string()),
            _ => None,
        }
    }
}

/// Builds a [`Document`] from an [`ElementDef`] tree
pub struct TreeBuilder {
    content: Box<dyn ContentProvider>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            content: Box::new(PlaceholderContent),
        }
    }

    /// Swap in a different content provider
    pub fn with_content(mut self, provider: impl ContentProvider + 'static) -> Self {
        self.content = Box::new(provider);
        self
    }

    /// Construct the document, wiring parent links and preserving child order
    pub fn build(&self, def: &ElementDef) -> Result<Document, DomError> {
        let mut doc = Document::new(&def.tag);
        let root = doc.root();
        tracing::debug!("Building tree rooted at <{}>", def.tag);

        self.fill_content(&mut doc, root, &def.tag);
        for child in &def.children {
            self.build_node(&mut doc, root, child)?;
        }

        tracing::debug!("Built {} nodes", doc.node_count());
        Ok(doc)
    }

    fn build_node(
        &self,
        doc: &mut Document,
        parent: NodeId,
        def: &ElementDef,
    ) -> Result<(), DomError> {
        let node = doc.create_element(&def.tag);
        doc.append_child(parent, node)?;
        self.fill_content(doc, node, &def.tag);

        for child in &def.children {
            self.build_node(doc, node, child)?;
        }
        Ok(())
    }

    fn fill_content(&self, doc: &mut Document, node: NodeId, tag: &str) {
        if let Some(text) = self.content.content_for(tag) {
            doc.set_content(node, text);
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
