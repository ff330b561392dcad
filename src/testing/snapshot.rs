//! Snapshot rendering helpers.
//!
//! Converts the forms of a formset into a plain-text listing suitable for
//! snapshot testing: one line per form, in document order.

use std::fmt::Debug;
use std::hash::Hash;

use crate::formset::lifecycle::ConvenientFormset;
use crate::host::DomHost;
use crate::selector::SelectorList;

/// Render every form of `formset` as one line:
///
/// ```text
/// visible formset-0-user="ann" formset-0-DELETE=""
/// hidden  formset-1-user="bob" formset-1-DELETE="on"
/// ```
///
/// Fields are listed by name with their value; fields without a name are
/// skipped. Lines are joined with `'\n'`, without a trailing newline.
pub fn forms_to_string<H, N>(host: &H, formset: &ConvenientFormset<N>) -> String
where
    H: DomHost<Node = N>,
    N: Copy + Eq + Hash + Debug,
{
    let fields = SelectorList::of_types(&["input", "select", "textarea"]);
    formset
        .forms(host)
        .into_iter()
        .map(|form| {
            let state = if host.is_hidden(form) { "hidden " } else { "visible" };
            let mut line = state.to_owned();
            for field in host.query_selector_all(Some(form), &fields) {
                if let Some(name) = host.attribute(field, "name") {
                    line.push_str(&format!(" {name}=\"{}\"", host.value(field)));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FormsetFixture, Pilot};

    #[test]
    fn lists_forms_with_state() {
        let fixture = FormsetFixture::new()
            .with_forms(2)
            .with_delete_buttons(true)
            .with_deleted(&[0]);
        let pilot = Pilot::new(&fixture).unwrap();
        let output = forms_to_string(pilot.document(), pilot.formset());
        assert_eq!(
            output,
            "hidden  formset-0-user=\"user 0\" formset-0-DELETE=\"on\"\n\
             visible formset-1-user=\"user 1\" formset-1-DELETE=\"\""
        );
    }

    #[test]
    fn empty_formset_renders_nothing() {
        let pilot = Pilot::new(&FormsetFixture::new()).unwrap();
        assert_eq!(forms_to_string(pilot.document(), pilot.formset()), "");
    }
}
