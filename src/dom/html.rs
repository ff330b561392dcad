//! HTML serialization of a document subtree.
//!
//! Output is compact (no whitespace between elements), attributes keep their
//! insertion order, and void elements are written without a closing tag.

use std::fmt::Write;

use super::node::NodeId;
use super::tree::Document;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize `node` and its subtree. Stale handles yield an empty string.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(&mut out, node);
        out
    }

    /// Serialize the whole document.
    pub fn root_html(&self) -> String {
        self.root().map(|root| self.to_html(root)).unwrap_or_default()
    }

    fn write_html(&self, out: &mut String, node: NodeId) {
        let Some(data) = self.get(node) else {
            return;
        };
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in data.attrs() {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&data.tag.as_str()) {
            return;
        }
        for &child in self.children(node) {
            self.write_html(out, child);
        }
        let _ = write!(out, "</{}>", data.tag);
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
