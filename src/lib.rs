// Document pipeline: tree construction, style cascade, event dispatch,
// and terminal rendering.
pub mod css;
pub mod dom;
pub mod renderer;
pub mod scene;

pub use css::{RuleDef, StyleMap, StyleResolver, StyleValue, Stylesheet};
pub use dom::{Document, ElementDef, Event, NodeId, TreeBuilder};
pub use renderer::{Renderer, RendererConfig};
pub use scene::Scene;
