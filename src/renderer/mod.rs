// Terminal renderer: writes the visible nodes as (optionally colored) text lines
use crate::css::StyleValue;
use crate::dom::{Document, NodeId};
use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::io::{self, Write};

const RESET: &str = "\x1b[0m";

lazy_static! {
    /// Color keyword to ANSI foreground escape
    static ref COLOR_CODES: FxHashMap<&'static str, &'static str> = {
        let mut codes = FxHashMap::default();
        codes.insert("red", "\x1b[31m");
        codes.insert("green", "\x1b[32m");
        codes.insert("yellow", "\x1b[33m");
        codes.insert("blue", "\x1b[34m");
        codes.insert("black", "\x1b[30m");
        codes.insert("white", "\x1b[37m");
        codes
    };
}

/// Configuration for the terminal renderer
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Tags whose content is written out; every other tag is a
    /// transparent container whose children are still visited
    pub visible_tags: Vec<SmolStr>,
    /// Emit ANSI escapes when a node's `color` style names a known color
    pub color: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            visible_tags: vec![SmolStr::new("h1"), SmolStr::new("p")],
            color: true,
        }
    }
}

/// Renderer that writes a document's visible content as text lines
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Write the visible nodes of `doc` to `out` in tree order
    ///
    /// One line per visible node. Reads effective styles, so the cascade
    /// should have run first.
    pub fn render(&self, doc: &Document, out: &mut impl Write) -> io::Result<()> {
        for node in doc.descendants(doc.root()) {
            self.render_node(doc, node, out)?;
        }
        Ok(())
    }

    fn render_node(&self, doc: &Document, node: NodeId, out: &mut impl Write) -> io::Result<()> {
        let tag = doc.tag(node);
        if !self.config.visible_tags.iter().any(|t| t == tag) {
            return Ok(());
        }

        // headings shout, everything else renders verbatim
        let content = doc.content(node);
        let text = if tag == "h1" {
            content.to_uppercase()
        } else {
            content.to_string()
        };

        let escape = self
            .config
            .color
            .then(|| doc.style_value(node, "color"))
            .flatten()
            .and_then(StyleValue::as_keyword)
            .and_then(|name| COLOR_CODES.get(name).copied());

        match escape {
            Some(code) => writeln!(out, "{}{}{}", code, text, RESET),
            None => writeln!(out, "{}", text),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
