//! Pilot: drive a formset through clicks without a browser.
//!
//! The `Pilot` owns a [`Document`] and the [`ConvenientFormset`] wired to it,
//! and offers click-by-selector plus inspection helpers for assertions.

use crate::dom::{Document, NodeId};
use crate::error::FormsetError;
use crate::formset::lifecycle::ConvenientFormset;
use crate::formset::options::FormsetOptions;
use crate::host::DomHost;
use crate::selector::parse_selector_list;

use super::fixture::FormsetFixture;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless formset driver for testing.
///
/// # Examples
///
/// ```ignore
/// use convenient_formsets::testing::{FormsetFixture, Pilot};
///
/// let mut pilot = Pilot::new(&FormsetFixture::new().with_forms(2)).unwrap();
/// pilot.click("#add-form-button");
/// assert_eq!(pilot.total_forms(), "3");
/// ```
pub struct Pilot {
    document: Document,
    formset: ConvenientFormset,
}

impl Pilot {
    /// Build the fixture's markup and initialize a formset with its options.
    pub fn new(fixture: &FormsetFixture) -> Result<Self, FormsetError> {
        Self::with_document(fixture.build(), &fixture.options())
    }

    /// Initialize a formset over an existing document.
    pub fn with_document(mut document: Document, options: &FormsetOptions) -> Result<Self, FormsetError> {
        let formset = ConvenientFormset::new(&mut document, options)?;
        Ok(Self { document, formset })
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Click the first element matching `selector`.
    ///
    /// Returns whether the click reached a trigger. An invalid selector or a
    /// miss returns `false`.
    pub fn click(&mut self, selector: &str) -> bool {
        match self.document.select(selector) {
            Ok(Some(target)) => self.click_node(target),
            _ => false,
        }
    }

    /// Click the first element matching `selector` inside the form at
    /// `index` (document order, hidden forms included).
    pub fn click_in_form(&mut self, index: usize, selector: &str) -> bool {
        let Some(&form) = self.forms().get(index) else {
            return false;
        };
        match self.document.select_within(form, selector) {
            Ok(targets) => match targets.first() {
                Some(&target) => self.click_node(target),
                None => false,
            },
            Err(_) => false,
        }
    }

    pub fn click_node(&mut self, target: NodeId) -> bool {
        self.formset.handle_click(&mut self.document, target)
    }

    /// Click the add button `times` times.
    pub fn add_forms(&mut self, times: usize) {
        for _ in 0..times {
            if let Some(button) = self.formset.add_button() {
                self.click_node(button);
            }
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn formset(&self) -> &ConvenientFormset {
        &self.formset
    }

    /// All forms, document order.
    pub fn forms(&self) -> Vec<NodeId> {
        self.formset.forms(&self.document)
    }

    pub fn visible_forms(&self) -> Vec<NodeId> {
        self.formset.visible_forms(&self.document)
    }

    /// Hidden state of each form, document order.
    pub fn hidden_flags(&self) -> Vec<bool> {
        self.forms()
            .into_iter()
            .map(|form| self.document.is_hidden(form))
            .collect()
    }

    /// Name of the field ending in `-<suffix>` in each form that has one.
    pub fn field_names(&self, suffix: &str) -> Vec<String> {
        self.fields(suffix)
            .into_iter()
            .filter_map(|field| self.document.attribute(field, "name").map(str::to_owned))
            .collect()
    }

    /// Value of the field ending in `-<suffix>` in each form that has one.
    pub fn field_values(&self, suffix: &str) -> Vec<String> {
        self.fields(suffix)
            .into_iter()
            .map(|field| self.document.value(field).to_owned())
            .collect()
    }

    /// Current `TOTAL_FORMS` value.
    pub fn total_forms(&self) -> String {
        let field = self.formset.management().total_forms;
        self.document.value(field).to_owned()
    }

    pub fn add_button_hidden(&self) -> bool {
        self.formset
            .add_button()
            .is_some_and(|button| self.document.is_hidden(button))
    }

    /// Serialized forms container.
    pub fn container_html(&self) -> String {
        self.document.to_html(self.formset.forms_container())
    }

    fn fields(&self, suffix: &str) -> Vec<NodeId> {
        let Ok(selectors) = parse_selector_list(&format!(r#"input[name$="-{suffix}"]"#)) else {
            return Vec::new();
        };
        self.forms()
            .into_iter()
            .filter_map(|form| self.document.query_selector(Some(form), &selectors))
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
