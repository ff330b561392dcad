//! Selector matching against any [`DomHost`].
//!
//! Walks selector parts from right to left, matching compound selectors and
//! navigating the tree via combinators. Descendant combinators backtrack: if
//! the nearest matching ancestor does not lead to a full match, farther
//! ancestors are tried.

use crate::host::DomHost;
use crate::selector::model::{
    Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList, SelectorPart,
};

/// Check whether `node` matches any selector of the list.
pub fn matches_list<H: DomHost>(host: &H, node: H::Node, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_selector(host, node, selector))
}

/// Check whether a full selector matches `node`.
pub fn matches_selector<H: DomHost>(host: &H, node: H::Node, selector: &Selector) -> bool {
    let parts = &selector.parts;
    match parts.last() {
        Some(SelectorPart::Compound(compound)) => {
            matches_compound(host, node, compound) && matches_leftward(host, node, parts, parts.len() - 1)
        }
        _ => false,
    }
}

/// `parts[..=idx]` ends with a compound already matched by `node`; match the
/// remaining combinator + compound pairs to the left.
fn matches_leftward<H: DomHost>(
    host: &H,
    node: H::Node,
    parts: &[SelectorPart],
    idx: usize,
) -> bool {
    if idx == 0 {
        return true;
    }
    if idx < 2 {
        // Combinator without a preceding compound.
        return false;
    }

    let (SelectorPart::Combinator(combinator), SelectorPart::Compound(compound)) =
        (&parts[idx - 1], &parts[idx - 2])
    else {
        return false;
    };

    match combinator {
        Combinator::Child => host.parent(node).is_some_and(|parent| {
            matches_compound(host, parent, compound) && matches_leftward(host, parent, parts, idx - 2)
        }),
        Combinator::Descendant => host.ancestors(node).into_iter().any(|ancestor| {
            matches_compound(host, ancestor, compound)
                && matches_leftward(host, ancestor, parts, idx - 2)
        }),
    }
}

/// Check whether a compound selector matches a single element.
fn matches_compound<H: DomHost>(host: &H, node: H::Node, compound: &CompoundSelector) -> bool {
    if !host.contains(node) {
        return false;
    }
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => host.tag_name(node) == Some(name.as_str()),
        SelectorComponent::Universal => true,
        SelectorComponent::Class(name) => host
            .attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name)),
        SelectorComponent::Id(name) => host.attribute(node, "id") == Some(name.as_str()),
        SelectorComponent::Attribute { name, operator } => operator.test(host.attribute(node, name)),
        SelectorComponent::Not(inner) => !matches_list(host, node, inner),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementData, NodeId};
    use crate::selector::parse_selector_list;

    /// Build a test tree:
    /// ```text
    /// body
    /// └── div#formset
    ///     ├── div#forms-container
    ///     │   ├── div.form            (form0)
    ///     │   │   └── input[name=formset-0-DELETE]
    ///     │   └── div.form[hidden]    (form1)
    ///     └── div#empty-form
    ///         └── div.form            (template)
    /// ```
    fn build_test_doc() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.insert(ElementData::new("body"));
        let formset = doc.insert_child(body, ElementData::new("div").with_id("formset"));
        let container = doc.insert_child(formset, ElementData::new("div").with_id("forms-container"));
        let form0 = doc.insert_child(container, ElementData::new("div").with_class("form"));
        doc.insert_child(
            form0,
            ElementData::new("input")
                .with_attr("type", "hidden")
                .with_attr("name", "formset-0-DELETE"),
        );
        let form1 = doc.insert_child(
            container,
            ElementData::new("div").with_class("form").with_attr("hidden", ""),
        );
        let empty = doc.insert_child(formset, ElementData::new("div").with_id("empty-form"));
        let template = doc.insert_child(empty, ElementData::new("div").with_class("form"));
        (doc, form0, form1, template, container)
    }

    fn matches(doc: &Document, node: NodeId, selector: &str) -> bool {
        matches_list(doc, node, &parse_selector_list(selector).unwrap())
    }

    #[test]
    fn match_class_selector() {
        let (doc, form0, _, template, container) = build_test_doc();
        assert!(matches(&doc, form0, ".form"));
        assert!(matches(&doc, template, ".form"));
        assert!(!matches(&doc, container, ".form"));
    }

    #[test]
    fn match_descendant_combinator() {
        let (doc, form0, _, template, _) = build_test_doc();
        assert!(matches(&doc, template, "#formset #empty-form .form"));
        assert!(!matches(&doc, form0, "#formset #empty-form .form"));
    }

    #[test]
    fn match_descendant_backtracks_past_nearest_ancestor() {
        // The nearest `div` ancestor is not always the one that completes the chain.
        let (doc, form0, ..) = build_test_doc();
        assert!(matches(&doc, form0, "#formset div .form"));
        assert!(matches(&doc, form0, "body div div .form"));
        assert!(!matches(&doc, form0, "body div div div .form"));
    }

    #[test]
    fn match_child_combinator() {
        let (doc, form0, ..) = build_test_doc();
        assert!(matches(&doc, form0, "#forms-container > .form"));
        assert!(!matches(&doc, form0, "#formset > .form"));
    }

    #[test]
    fn match_not_hidden() {
        let (doc, form0, form1, ..) = build_test_doc();
        assert!(matches(&doc, form0, ".form:not([hidden])"));
        assert!(!matches(&doc, form1, ".form:not([hidden])"));
    }

    #[test]
    fn match_attribute_suffix() {
        let (doc, form0, ..) = build_test_doc();
        let delete = doc.children(form0)[0];
        assert!(matches(&doc, delete, r#"input[name$="DELETE"]"#));
        assert!(!matches(&doc, delete, r#"input[name$="ORDER"]"#));
        assert!(!matches(&doc, delete, r#"select[name$="DELETE"]"#));
    }

    #[test]
    fn match_selector_list_any() {
        let (doc, form0, ..) = build_test_doc();
        let delete = doc.children(form0)[0];
        assert!(matches(&doc, delete, "label, input, select"));
        assert!(!matches(&doc, delete, "label, select"));
    }

    #[test]
    fn match_non_ascii_class() {
        let mut doc = Document::new();
        let form = doc.insert(ElementData::new("div").with_class("formulário"));
        assert!(matches(&doc, form, ".formulário"));
        assert!(!matches(&doc, form, ".formulario"));
    }

    #[test]
    fn match_universal() {
        let (doc, form0, ..) = build_test_doc();
        assert!(matches(&doc, form0, "*"));
    }

    #[test]
    fn stale_node_never_matches() {
        let (mut doc, form0, ..) = build_test_doc();
        doc.remove(form0);
        assert!(!matches(&doc, form0, "*"));
    }
}
