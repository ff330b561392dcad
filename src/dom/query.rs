//! [`DomHost`] implementation for [`Document`] and string-selector queries.

use super::node::NodeId;
use super::tree::Document;
use crate::host::DomHost;
use crate::selector::{parse_selector_list, SelectorError};

impl DomHost for Document {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Document::root(self)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Document::parent(self, node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        Document::children(self, node).to_vec()
    }

    fn contains(&self, node: NodeId) -> bool {
        Document::contains(self, node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|data| data.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|data| data.attr(name))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.get_mut(node) {
            data.set_attr(name, value);
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.get_mut(node) {
            data.remove_attr(name);
        }
    }

    fn clone_subtree(&mut self, node: NodeId) -> Option<NodeId> {
        Document::clone_subtree(self, node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        Document::append_child(self, parent, child);
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) {
        Document::insert_before(self, parent, node, reference);
    }

    fn remove(&mut self, node: NodeId) {
        Document::remove(self, node);
    }
}

impl Document {
    /// First element in the document matching a selector string.
    pub fn select(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.query_selector(None, &list))
    }

    /// All elements in the document matching a selector string, in document order.
    pub fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.query_selector_all(None, &list))
    }

    /// All descendants of `scope` matching a selector string, in document order.
    pub fn select_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector_list(selector)?;
        Ok(self.query_selector_all(Some(scope), &list))
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::ElementData;
    use crate::dom::tree::Document;
    use crate::host::DomHost;

    /// Build a test tree for queries:
    /// ```text
    /// body
    /// ├── div#forms .container
    /// │   ├── div.form
    /// │   │   ├── label[for=id_f-0-a]
    /// │   │   └── input#id_f-0-a[name=f-0-a]
    /// │   └── div.form[hidden]
    /// │       └── input[name=f-1-a]
    /// └── button#add
    /// ```
    fn build_query_doc() -> Document {
        let mut doc = Document::new();
        let body = doc.insert(ElementData::new("body"));
        let forms = doc.insert_child(
            body,
            ElementData::new("div").with_id("forms").with_class("container"),
        );
        let form0 = doc.insert_child(forms, ElementData::new("div").with_class("form"));
        doc.insert_child(form0, ElementData::new("label").with_attr("for", "id_f-0-a"));
        doc.insert_child(
            form0,
            ElementData::new("input")
                .with_id("id_f-0-a")
                .with_attr("name", "f-0-a"),
        );
        let form1 = doc.insert_child(
            forms,
            ElementData::new("div").with_class("form").with_attr("hidden", ""),
        );
        doc.insert_child(form1, ElementData::new("input").with_attr("name", "f-1-a"));
        doc.insert_child(body, ElementData::new("button").with_id("add"));
        doc
    }

    #[test]
    fn select_by_id() {
        let doc = build_query_doc();
        let add = doc.select("#add").unwrap().unwrap();
        assert_eq!(doc.get(add).unwrap().tag, "button");
    }

    #[test]
    fn select_not_found() {
        let doc = build_query_doc();
        assert!(doc.select("#nonexistent").unwrap().is_none());
    }

    #[test]
    fn select_all_in_document_order() {
        let doc = build_query_doc();
        let inputs = doc.select_all("input").unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|&id| doc.attribute(id, "name").unwrap())
            .collect();
        assert_eq!(names, vec!["f-0-a", "f-1-a"]);
    }

    #[test]
    fn select_visible_forms() {
        let doc = build_query_doc();
        assert_eq!(doc.select_all(".form").unwrap().len(), 2);
        assert_eq!(doc.select_all(".form:not([hidden])").unwrap().len(), 1);
    }

    #[test]
    fn scoped_query_excludes_scope_itself() {
        let doc = build_query_doc();
        let forms = doc.select("#forms").unwrap().unwrap();
        assert!(doc.select_within(forms, ".container").unwrap().is_empty());
        assert_eq!(doc.select_within(forms, ".form").unwrap().len(), 2);
    }

    #[test]
    fn scoped_query_matches_against_full_ancestry() {
        let doc = build_query_doc();
        let form0 = doc.select(".form").unwrap().unwrap();
        // `#forms` lies outside the scope but still satisfies the combinator.
        assert_eq!(doc.select_within(form0, "#forms input").unwrap().len(), 1);
    }

    #[test]
    fn hidden_and_value_helpers() {
        let mut doc = build_query_doc();
        let input = doc.select("input").unwrap().unwrap();
        assert_eq!(doc.value(input), "");
        doc.set_value(input, "on");
        assert_eq!(doc.value(input), "on");

        assert!(!doc.is_hidden(input));
        doc.set_hidden(input, true);
        assert!(doc.is_hidden(input));
        doc.set_hidden(input, false);
        assert!(!doc.is_hidden(input));
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = build_query_doc();
        assert!(doc.select("input[").is_err());
    }

    #[test]
    fn query_on_empty_document() {
        let doc = Document::new();
        assert!(doc.select("#x").unwrap().is_none());
        assert!(doc.select_all("*").unwrap().is_empty());
    }
}
