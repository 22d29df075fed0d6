// Cascade resolution over a document tree
use super::StyleError;
use super::stylesheet::{Rule, Stylesheet};
use super::values::StyleMap;
use crate::dom::{Document, NodeId};
use rustc_hash::FxHashSet;

/// Applies a rule set to a document, computing every node's effective style
pub struct StyleResolver {
    sheet: Stylesheet,
}

impl StyleResolver {
    pub fn new(sheet: Stylesheet) -> Self {
        Self { sheet }
    }

    /// Annotate every node in the document with its effective style
    ///
    /// Pre-order from the root: each node resolves against its parent's
    /// already-computed effective style and its children then resolve
    /// against the fresh result, so inheritance is transitive and a child
    /// can never feed back into an ancestor. Re-running with the same sheet
    /// and unchanged own styles leaves every effective style unchanged.
    pub fn apply(&self, doc: &mut Document) -> Result<(), StyleError> {
        verify_tree(doc)?;

        tracing::debug!(
            "Applying {} rules to a document of {} nodes",
            self.sheet.rules.len(),
            doc.node_count()
        );

        let root = doc.root();
        let inherited = StyleMap::default();
        self.resolve(doc, root, &inherited);
        Ok(())
    }

    fn resolve(&self, doc: &mut Document, node: NodeId, inherited: &StyleMap) {
        let effective = self.resolve_one(doc, node, inherited);

        let children = doc.take_children(node);
        for &child in &children {
            self.resolve(doc, child, &effective);
        }
        doc.restore_children(node, children);

        doc.store_effective_style(node, effective);
    }

    /// Resolve a single node against its inherited base
    ///
    /// Precedence, lowest to highest: inherited style, matching rules in
    /// ascending specificity (stable sort, so declaration order breaks
    /// ties and later rules win), then the node's own style.
    fn resolve_one(&self, doc: &Document, node: NodeId, inherited: &StyleMap) -> StyleMap {
        let mut effective = inherited.clone();

        let mut matching: Vec<&Rule> = self
            .sheet
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(doc, node))
            .collect();
        matching.sort_by_key(|rule| rule.selector.specificity());

        for rule in matching {
            for (property, value) in &rule.style {
                effective.insert(property.clone(), value.clone());
            }
        }

        // own style always wins
        for (property, value) in doc.own_style(node) {
            effective.insert(property.clone(), value.clone());
        }

        effective
    }
}

/// Defensive structure check before a cascade runs
///
/// Construction-only parent assignment should make cycles impossible, but
/// the cascade and selector matching both walk links unboundedly, so a
/// corrupted tree is rejected instead of hanging: the root must be
/// parentless, no node may be reached twice from the root, and every
/// child's back-reference must point at the node that lists it.
fn verify_tree(doc: &Document) -> Result<(), StyleError> {
    if doc.parent(doc.root()).is_some() {
        return Err(StyleError::InvalidTree);
    }

    let mut visited = FxHashSet::default();
    let mut stack = vec![doc.root()];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            return Err(StyleError::InvalidTree);
        }
        for &child in doc.children(id) {
            if doc.parent(child) != Some(id) {
                return Err(StyleError::InvalidTree);
            }
            stack.push(child);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::values::{StyleValue, style_map};

    /// html > body > (div > div > h1, aside > h1)
    struct Fixture {
        doc: Document,
        body: NodeId,
        outer_div: NodeId,
        inner_div: NodeId,
        deep_h1: NodeId,
        aside: NodeId,
        aside_h1: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new("html");
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body).unwrap();

        let outer_div = doc.create_element("div");
        doc.append_child(body, outer_div).unwrap();
        let inner_div = doc.create_element("div");
        doc.append_child(outer_div, inner_div).unwrap();
        let deep_h1 = doc.create_element("h1");
        doc.append_child(inner_div, deep_h1).unwrap();

        let aside = doc.create_element("aside");
        doc.append_child(body, aside).unwrap();
        let aside_h1 = doc.create_element("h1");
        doc.append_child(aside, aside_h1).unwrap();

        Fixture {
            doc,
            body,
            outer_div,
            inner_div,
            deep_h1,
            aside,
            aside_h1,
        }
    }

    /// The reference rule set used across the cascade tests
    fn reference_sheet() -> Stylesheet {
        let mut sheet = Stylesheet::new();
        sheet
            .push_rule(
                "body section",
                style_map([("color", "green".into()), ("size", 25.into())]),
            )
            .unwrap();
        sheet
            .push_rule("body", style_map([("background", "black".into())]))
            .unwrap();
        sheet
            .push_rule(
                "h1",
                style_map([("size", 50.into()), ("color", "red".into())]),
            )
            .unwrap();
        sheet
            .push_rule("aside h1", style_map([("size", 30.into())]))
            .unwrap();
        sheet
    }

    fn value(doc: &Document, node: NodeId, property: &str) -> Option<StyleValue> {
        doc.full_style(node).get(property).cloned()
    }

    #[test]
    fn untouched_properties_inherit_from_the_parent() {
        let mut f = fixture();
        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        // background is set on body only and flows down unchanged
        for node in [f.outer_div, f.inner_div, f.deep_h1, f.aside, f.aside_h1] {
            assert_eq!(value(&f.doc, node, "background"), Some("black".into()));
        }
    }

    #[test]
    fn root_resolves_from_an_empty_base() {
        let mut f = fixture();
        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        // no rule matches html and nothing is inherited from above
        assert!(f.doc.full_style(f.doc.root()).is_empty());
    }

    #[test]
    fn own_style_beats_every_rule() {
        let mut f = fixture();
        f.doc.set_own_style(f.deep_h1, "size", 12.into());
        f.doc.set_own_style(f.deep_h1, "margin", 4.into());

        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        assert_eq!(value(&f.doc, f.deep_h1, "size"), Some(12.into()));
        // properties with no rule still come through
        assert_eq!(value(&f.doc, f.deep_h1, "margin"), Some(4.into()));
        // untouched rule properties still apply
        assert_eq!(value(&f.doc, f.deep_h1, "color"), Some("red".into()));
    }

    #[test]
    fn longer_paths_override_shorter_ones() {
        let mut f = fixture();
        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        assert_eq!(value(&f.doc, f.aside_h1, "size"), Some(30.into()));
        assert_eq!(value(&f.doc, f.deep_h1, "size"), Some(50.into()));
    }

    #[test]
    fn specificity_beats_declaration_order() {
        let mut f = fixture();
        // the more specific rule is declared first but still wins
        let mut sheet = Stylesheet::new();
        sheet
            .push_rule("aside h1", style_map([("size", 30.into())]))
            .unwrap();
        sheet
            .push_rule("h1", style_map([("size", 50.into())]))
            .unwrap();

        let resolver = StyleResolver::new(sheet);
        resolver.apply(&mut f.doc).unwrap();

        assert_eq!(value(&f.doc, f.aside_h1, "size"), Some(30.into()));
    }

    #[test]
    fn declaration_order_breaks_equal_specificity() {
        let mut f = fixture();
        let mut sheet = Stylesheet::new();
        sheet
            .push_rule("body h1", style_map([("size", 10.into())]))
            .unwrap();
        sheet
            .push_rule("aside h1", style_map([("size", 20.into())]))
            .unwrap();

        let resolver = StyleResolver::new(sheet);
        resolver.apply(&mut f.doc).unwrap();

        // both two-token rules match aside_h1; the later declaration wins
        assert_eq!(value(&f.doc, f.aside_h1, "size"), Some(20.into()));
    }

    #[test]
    fn reapplying_the_same_sheet_is_idempotent() {
        let mut f = fixture();
        f.doc.set_own_style(f.body, "color", "blue".into());
        let resolver = StyleResolver::new(reference_sheet());

        resolver.apply(&mut f.doc).unwrap();
        let first: Vec<StyleMap> = f
            .doc
            .style_hierarchy()
            .map(|(_, _, style)| style.clone())
            .collect();

        resolver.apply(&mut f.doc).unwrap();
        let second: Vec<StyleMap> = f
            .doc
            .style_hierarchy()
            .map(|(_, _, style)| style.clone())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn sibling_resolution_never_leaks_into_ancestors() {
        let mut f = fixture();
        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        // aside h1 resolves size 30, but neither its parent nor the h1 in
        // the other branch may observe that
        assert_eq!(value(&f.doc, f.aside, "size"), None);
        assert_eq!(value(&f.doc, f.deep_h1, "size"), Some(50.into()));
    }

    #[test]
    fn reference_scenario_resolves_exactly() {
        let mut f = fixture();
        let resolver = StyleResolver::new(reference_sheet());
        resolver.apply(&mut f.doc).unwrap();

        let deep = f.doc.full_style(f.deep_h1);
        assert_eq!(deep.len(), 3);
        assert_eq!(deep.get("background"), Some(&"black".into()));
        assert_eq!(deep.get("size"), Some(&50.into()));
        assert_eq!(deep.get("color"), Some(&"red".into()));

        let aside = f.doc.full_style(f.aside_h1);
        assert_eq!(aside.len(), 3);
        assert_eq!(aside.get("background"), Some(&"black".into()));
        assert_eq!(aside.get("size"), Some(&30.into()));
        assert_eq!(aside.get("color"), Some(&"red".into()));
    }

    #[test]
    fn unmatched_rules_are_not_an_error() {
        let mut f = fixture();
        let mut sheet = Stylesheet::new();
        sheet
            .push_rule("nav", style_map([("color", "blue".into())]))
            .unwrap();

        let resolver = StyleResolver::new(sheet);
        assert!(resolver.apply(&mut f.doc).is_ok());
        assert!(f.doc.full_style(f.deep_h1).is_empty());
    }

    #[test]
    fn child_list_cycle_is_rejected() {
        let mut f = fixture();
        // corrupt the tree: the root reappears below one of its descendants
        f.doc.push_child_unchecked(f.deep_h1, f.doc.root());

        let resolver = StyleResolver::new(reference_sheet());
        assert!(matches!(
            resolver.apply(&mut f.doc),
            Err(StyleError::InvalidTree)
        ));
    }

    #[test]
    fn parented_root_is_rejected() {
        let mut f = fixture();
        f.doc.corrupt_parent(f.doc.root(), f.deep_h1);

        let resolver = StyleResolver::new(reference_sheet());
        assert!(matches!(
            resolver.apply(&mut f.doc),
            Err(StyleError::InvalidTree)
        ));
    }

    #[test]
    fn inconsistent_back_reference_is_rejected() {
        let mut f = fixture();
        f.doc.corrupt_parent(f.aside_h1, f.body);

        let resolver = StyleResolver::new(reference_sheet());
        assert!(matches!(
            resolver.apply(&mut f.doc),
            Err(StyleError::InvalidTree)
        ));
    }
}
