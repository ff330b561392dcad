//! Renumbering: rewrite the group token of every label and field so forms
//! are numbered `0..N` in canonical order.
//!
//! Canonical order is document order, or, when the formset is orderable,
//! ascending group index read from each form's ORDER field name. Moves only
//! swap ORDER values, so forms keep their index across reorders. Running a
//! pass twice without a structural change in between leaves every attribute
//! as the first pass wrote it.

use crate::formset::locator::{self, GroupIndex, GroupLocator};
use crate::host::DomHost;
use crate::selector::SelectorList;

/// Attributes rewritten on `label` elements.
const LABEL_ATTRS: &[&str] = &["for"];

/// Attributes rewritten on `input`, `select` and `textarea` elements.
const FIELD_ATTRS: &[&str] = &["id", "name"];

/// Sort key of a form when ordering is enabled. Forms whose ORDER field
/// carries no group index (a fresh template copy, or no field at all) sort
/// after all others; ties keep document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderKey {
    Indexed(usize),
    Unassigned,
}

/// Order key of `form`, read from the name of its first order field.
pub fn order_key<H: DomHost>(host: &H, prefix: &str, form: H::Node, order_field: &SelectorList) -> OrderKey {
    let index = host
        .query_selector(Some(form), order_field)
        .and_then(|field| host.attribute(field, "name"))
        .and_then(|name| GroupLocator::find(prefix, name))
        .map(|loc| loc.index);
    match index {
        Some(GroupIndex::Position(position)) => OrderKey::Indexed(position),
        Some(GroupIndex::Unassigned) | None => OrderKey::Unassigned,
    }
}

/// Forms in canonical order. `forms` must be in document order.
pub fn canonical_order<H: DomHost>(
    host: &H,
    prefix: &str,
    forms: Vec<H::Node>,
    order_field: Option<&SelectorList>,
) -> Vec<H::Node> {
    match order_field {
        None => forms,
        Some(order_field) => {
            let mut keyed: Vec<_> = forms
                .into_iter()
                .map(|form| (order_key(host, prefix, form, order_field), form))
                .collect();
            // Stable: equal keys keep document order.
            keyed.sort_by_key(|(key, _)| *key);
            keyed.into_iter().map(|(_, form)| form).collect()
        }
    }
}

/// Number `forms` by their position in the slice.
pub fn renumber<H: DomHost>(host: &mut H, prefix: &str, forms: &[H::Node]) {
    log::trace!("renumbering {} form(s) with prefix `{prefix}`", forms.len());

    let labels = SelectorList::of_types(&["label"]);
    let fields = SelectorList::of_types(&["input", "select", "textarea"]);

    for (index, &form) in forms.iter().enumerate() {
        for label in host.query_selector_all(Some(form), &labels) {
            rewrite_attrs(host, prefix, label, LABEL_ATTRS, index);
        }
        for field in host.query_selector_all(Some(form), &fields) {
            rewrite_attrs(host, prefix, field, FIELD_ATTRS, index);
        }
    }
}

fn rewrite_attrs<H: DomHost>(host: &mut H, prefix: &str, node: H::Node, attrs: &[&str], index: usize) {
    for &attr in attrs {
        let Some(value) = host.attribute(node, attr) else {
            continue;
        };
        let Some(rewritten) = locator::renumbered(prefix, value, index) else {
            continue;
        };
        if rewritten != value {
            log::trace!("{attr}: `{value}` -> `{rewritten}`");
            host.set_attribute(node, attr, &rewritten);
        }
    }
}
