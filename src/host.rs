//! The document capability interface the formset engine runs against.
//!
//! [`DomHost`] is deliberately narrow: tree navigation, attribute access and a
//! handful of structural mutations. Everything the engine needs on top of that
//! (hidden state, field values, selector queries) is provided in terms of those
//! primitives, so an alternate tree (a browser binding, a virtual DOM) only has
//! to implement the required methods.

use std::fmt::Debug;
use std::hash::Hash;

use crate::selector::{matching, SelectorList};

/// Attribute carrying the boolean "hidden" state of an element.
pub const HIDDEN_ATTR: &str = "hidden";

/// Attribute carrying a field's current value.
pub const VALUE_ATTR: &str = "value";

/// A mutable element tree.
///
/// Implementations must treat unknown or stale node handles as absent: reads
/// return `None`/empty, writes are ignored.
pub trait DomHost {
    /// Stable handle to an element. Must stay valid while the element lives,
    /// regardless of where it is moved in the tree.
    type Node: Copy + Eq + Hash + Debug;

    // ── Navigation ───────────────────────────────────────────────────

    /// The document root, if any.
    fn root(&self) -> Option<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn contains(&self, node: Self::Node) -> bool;

    // ── Element data ─────────────────────────────────────────────────

    /// Lower-case tag name.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    // ── Structure ────────────────────────────────────────────────────

    /// Deep-copy `node` and its subtree. The copy is detached.
    fn clone_subtree(&mut self, node: Self::Node) -> Option<Self::Node>;

    /// Append `child` as the last child of `parent`, moving it if attached.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Move `node` immediately before `reference` among `parent`'s children.
    fn insert_before(&mut self, parent: Self::Node, node: Self::Node, reference: Self::Node);

    /// Detach `node` from the tree and discard its subtree.
    fn remove(&mut self, node: Self::Node);

    // ── Provided ─────────────────────────────────────────────────────

    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn is_hidden(&self, node: Self::Node) -> bool {
        self.has_attribute(node, HIDDEN_ATTR)
    }

    fn set_hidden(&mut self, node: Self::Node, hidden: bool) {
        if hidden {
            self.set_attribute(node, HIDDEN_ATTR, "");
        } else {
            self.remove_attribute(node, HIDDEN_ATTR);
        }
    }

    /// Current value of a field; absent means empty.
    fn value(&self, node: Self::Node) -> &str {
        self.attribute(node, VALUE_ATTR).unwrap_or("")
    }

    fn set_value(&mut self, node: Self::Node, value: &str) {
        self.set_attribute(node, VALUE_ATTR, value);
    }

    /// Ancestors of `node`, nearest first.
    fn ancestors(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut result = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            result.push(parent);
            current = parent;
        }
        result
    }

    /// Descendants of `node` in document (pre-) order, excluding `node`.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut result = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        result
    }

    /// Whether `node` matches any selector in `selectors`.
    fn matches(&self, node: Self::Node, selectors: &SelectorList) -> bool
    where
        Self: Sized,
    {
        matching::matches_list(self, node, selectors)
    }

    /// First descendant of `scope` (or of the whole document when `None`)
    /// matching `selectors`, in document order.
    ///
    /// As in a browser, the selector is matched against the full ancestor chain,
    /// not just the part below `scope`.
    fn query_selector(
        &self,
        scope: Option<Self::Node>,
        selectors: &SelectorList,
    ) -> Option<Self::Node>
    where
        Self: Sized,
    {
        self.query_selector_all(scope, selectors).into_iter().next()
    }

    /// All descendants of `scope` (or of the whole document when `None`)
    /// matching `selectors`, in document order.
    fn query_selector_all(
        &self,
        scope: Option<Self::Node>,
        selectors: &SelectorList,
    ) -> Vec<Self::Node>
    where
        Self: Sized,
    {
        let candidates = match scope {
            Some(scope) => self.descendants(scope),
            None => match self.root() {
                Some(root) => {
                    let mut all = vec![root];
                    all.extend(self.descendants(root));
                    all
                }
                None => Vec::new(),
            },
        };
        candidates
            .into_iter()
            .filter(|&node| self.matches(node, selectors))
            .collect()
    }
}
