//! Formset construction.
//!
//! [`ConvenientFormset::new`] runs every initialization gate in order and
//! either returns a fully wired formset or fails without having bound any
//! trigger.

use std::fmt::Debug;
use std::hash::Hash;

use crate::dom::NodeId;
use crate::error::FormsetError;
use crate::formset::dispatch::{DispatchTable, FormAction};
use crate::formset::management::{ManagementForm, MaxForms};
use crate::formset::options::{FormsetConfig, FormsetOptions};
use crate::formset::resolver::{
    self, delete_field_selector, form_requirements, missing_in_forms, FormsetElements,
};
use crate::host::DomHost;
use crate::selector::SelectorList;

/// Value of a DELETE field marking its form as deleted.
pub const DELETE_MARKER: &str = "on";

/// A formset bound to a document.
///
/// The formset does not own the document: every operation takes the host it
/// was created against. All state beyond the configuration and the trigger
/// bindings lives in the document itself.
#[derive(Debug, Clone)]
pub struct ConvenientFormset<N = NodeId> {
    pub(crate) config: FormsetConfig,
    pub(crate) elements: FormsetElements<N>,
    pub(crate) management: ManagementForm<N>,
    pub(crate) dispatch: DispatchTable<N>,
    pub(crate) delete_field: SelectorList,
    pub(crate) order_field: SelectorList,
}

impl<N> ConvenientFormset<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Validate `options` against `host` and wire up the formset.
    pub fn new<H>(host: &mut H, options: &FormsetOptions) -> Result<Self, FormsetError>
    where
        H: DomHost<Node = N>,
    {
        let config = options.validate()?;
        let elements = resolver::resolve_elements(host, &config)?;
        let management = ManagementForm::resolve(host, &config.prefix)?;

        let requirements = form_requirements(&config);
        if let Some(add) = elements.add {
            let missing = missing_in_forms(host, &[add.template], &requirements);
            if !missing.is_empty() {
                return Err(FormsetError::MissingEmptyFormElements(missing));
            }
        }

        let mut formset = Self {
            config,
            elements,
            management,
            dispatch: DispatchTable::new(),
            delete_field: delete_field_selector(),
            order_field: resolver::order_field_selector(),
        };

        let missing = missing_in_forms(host, &formset.visible_forms(host), &requirements);
        if !missing.is_empty() {
            return Err(FormsetError::MissingFormElements(missing));
        }

        if formset.config.can_delete() {
            formset.restore_deleted_forms(host);
        }

        if matches!(formset.management.max_forms(host), MaxForms::Unlimited) {
            log::warn!(
                "formset `{}`: MAX_NUM_FORMS is not a number, treating as unlimited",
                formset.config.prefix
            );
        }
        if formset.config.hides_add_button() {
            formset.update_add_button_visibility(host);
        }

        if let Some(add) = formset.elements.add {
            formset.dispatch.bind(add.add_button, FormAction::AddForm);
        }
        for form in formset.visible_forms(host) {
            formset.bind_form(host, form);
        }

        log::debug!(
            "initialized formset `{}`: {} form(s), add={}, delete={}, order={}, {} binding(s)",
            formset.config.prefix,
            formset.forms(host).len(),
            formset.config.can_add(),
            formset.config.can_delete(),
            formset.config.can_order(),
            formset.dispatch.len(),
        );
        Ok(formset)
    }

    /// Hide forms whose DELETE field already holds the marker, e.g. after a
    /// failed server-side validation round trip.
    fn restore_deleted_forms<H>(&self, host: &mut H)
    where
        H: DomHost<Node = N>,
    {
        for form in self.forms(host) {
            let marked = host
                .query_selector(Some(form), &self.delete_field)
                .is_some_and(|field| host.value(field) == DELETE_MARKER);
            if marked {
                host.set_hidden(form, true);
            }
        }
    }

    /// Bind the delete and move triggers found inside `form`.
    pub(crate) fn bind_form<H>(&mut self, host: &H, form: N)
    where
        H: DomHost<Node = N>,
    {
        if let Some(delete) = &self.config.delete {
            if let Some(trigger) = host.query_selector(Some(form), &delete.selectors) {
                self.dispatch.bind(trigger, FormAction::DeleteForm(form));
            }
        }
        if let Some(order) = &self.config.order {
            if let Some(trigger) = host.query_selector(Some(form), &order.move_up.selectors) {
                self.dispatch.bind(trigger, FormAction::MoveFormUp(form));
            }
            if let Some(trigger) = host.query_selector(Some(form), &order.move_down.selectors) {
                self.dispatch.bind(trigger, FormAction::MoveFormDown(form));
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &FormsetConfig {
        &self.config
    }

    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    pub fn forms_container(&self) -> N {
        self.elements.forms_container
    }

    /// The add button, when adding is enabled.
    pub fn add_button(&self) -> Option<N> {
        self.elements.add.map(|add| add.add_button)
    }

    /// The empty form template, when adding is enabled.
    pub fn template(&self) -> Option<N> {
        self.elements.add.map(|add| add.template)
    }

    pub fn management(&self) -> &ManagementForm<N> {
        &self.management
    }

    pub fn dispatch(&self) -> &DispatchTable<N> {
        &self.dispatch
    }

    /// Every form in the container, soft-deleted ones included, in document order.
    pub fn forms<H>(&self, host: &H) -> Vec<N>
    where
        H: DomHost<Node = N>,
    {
        host.query_selector_all(Some(self.elements.forms_container), &self.config.form.selectors)
    }

    /// Forms not hidden, in document order.
    pub fn visible_forms<H>(&self, host: &H) -> Vec<N>
    where
        H: DomHost<Node = N>,
    {
        self.forms(host)
            .into_iter()
            .filter(|&form| !host.is_hidden(form))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::testing::FormsetFixture;
    use pretty_assertions::assert_eq;

    fn init(doc: &mut Document, options: &FormsetOptions) -> Result<ConvenientFormset, FormsetError> {
        ConvenientFormset::new(doc, options)
    }

    #[test]
    fn initializes_with_default_fixture() {
        let fixture = FormsetFixture::new().with_forms(2);
        let mut doc = fixture.build();
        let formset = init(&mut doc, &fixture.options()).unwrap();
        assert_eq!(formset.forms(&doc).len(), 2);
        assert_eq!(formset.prefix(), "formset");
        assert!(formset.add_button().is_some());
        // Only the add button is bound.
        assert_eq!(formset.dispatch().len(), 1);
    }

    #[test]
    fn empty_options_fail_before_touching_the_document() {
        let mut doc = FormsetFixture::new().build();
        let err = init(&mut doc, &FormsetOptions::new()).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"[ConvenientFormset] Missing required options: `formsetPrefix`, `formsContainerSelector`, `formSelector`, `emptyFormSelector`, `addFormButtonSelector`"
        );
    }

    #[test]
    fn missing_elements_are_reported_together() {
        let fixture = FormsetFixture::new();
        let mut doc = fixture.build();
        let options = fixture
            .options()
            .with_forms_container_selector("#missing-container")
            .with_empty_form_selector("#missing-empty-form")
            .with_add_form_button_selector("#missing-button");
        let err = init(&mut doc, &options).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"[ConvenientFormset] Unable to find DOM element with selectors: `#missing-container`, `#missing-empty-form`, `#missing-button`"
        );
    }

    #[test]
    fn missing_management_form() {
        let fixture = FormsetFixture::new().without_management_form();
        let mut doc = fixture.build();
        let err = init(&mut doc, &fixture.options()).unwrap_err();
        assert!(matches!(err, FormsetError::ManagementForm { .. }));
    }

    #[test]
    fn template_must_carry_feature_triggers() {
        let fixture = FormsetFixture::new()
            .with_forms(1)
            .with_delete_buttons(true)
            .with_order_fields(true);
        let mut doc = fixture.build();
        let template = doc.select("#empty-form .form").unwrap().unwrap();
        for child in doc.children(template).to_vec() {
            doc.remove(child);
        }
        let err = init(&mut doc, &fixture.options()).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r#"[ConvenientFormset] Unable to find DOM elements in empty form with selectors: `.delete-form-button`, `.move-form-up-button`, `.move-form-down-button`, `input[name$="ORDER"]`"#
        );
    }

    #[test]
    fn visible_forms_must_carry_feature_triggers() {
        let fixture = FormsetFixture::new().with_forms(2).with_delete_buttons(true);
        let mut doc = fixture.build();
        let button = doc.select(".form .delete-form-button").unwrap().unwrap();
        doc.remove(button);
        let err = init(&mut doc, &fixture.options()).unwrap_err();
        assert!(matches!(
            err,
            FormsetError::MissingFormElements(ref missing) if missing == &vec![".delete-form-button".to_owned()]
        ));
    }

    #[test]
    fn hidden_forms_are_not_checked_for_triggers() {
        let fixture = FormsetFixture::new().with_forms(2).with_delete_buttons(true);
        let mut doc = fixture.build();
        let forms = doc.select_all("#forms-container .form").unwrap();
        let button = doc.select_within(forms[0], ".delete-form-button").unwrap()[0];
        doc.remove(button);
        doc.set_hidden(forms[0], true);
        assert!(init(&mut doc, &fixture.options()).is_ok());
    }

    #[test]
    fn restores_soft_deleted_forms_on_load() {
        let fixture = FormsetFixture::new()
            .with_forms(5)
            .with_delete_fields(true)
            .with_delete_buttons(true)
            .with_deleted(&[0, 2, 4])
            .with_max_forms("5");
        let mut doc = fixture.build();
        let formset = init(&mut doc, &fixture.options()).unwrap();

        let hidden: Vec<bool> = formset.forms(&doc).iter().map(|&f| doc.is_hidden(f)).collect();
        assert_eq!(hidden, vec![true, false, true, false, true]);
        let add_button = formset.add_button().unwrap();
        assert!(!doc.is_hidden(add_button));
        // Add button plus one delete trigger per visible form.
        assert_eq!(formset.dispatch().len(), 3);
    }

    #[test]
    fn delete_markers_ignored_when_delete_disabled() {
        let fixture = FormsetFixture::new()
            .with_forms(2)
            .with_delete_fields(true)
            .with_deleted(&[0]);
        let mut doc = fixture.build();
        let formset = init(&mut doc, &fixture.options()).unwrap();
        assert_eq!(formset.visible_forms(&doc).len(), 2);
    }

    #[test]
    fn add_button_hidden_at_max_on_load() {
        let fixture = FormsetFixture::new().with_forms(3).with_max_forms("3");
        let mut doc = fixture.build();
        let formset = init(&mut doc, &fixture.options()).unwrap();
        assert!(doc.is_hidden(formset.add_button().unwrap()));
    }

    #[test]
    fn add_button_untouched_without_auto_hide() {
        let fixture = FormsetFixture::new().with_forms(3).with_max_forms("3");
        let mut doc = fixture.build();
        let options = fixture.options().with_hide_add_form_button_on_max_forms(false);
        let formset = init(&mut doc, &options).unwrap();
        assert!(!doc.is_hidden(formset.add_button().unwrap()));
    }

    #[test]
    fn add_disabled_needs_no_template() {
        let fixture = FormsetFixture::new().with_forms(1).without_empty_form();
        let mut doc = fixture.build();
        let options = fixture.options().with_can_add_forms(false);
        let formset = init(&mut doc, &options).unwrap();
        assert!(formset.add_button().is_none());
        assert!(formset.template().is_none());
        assert!(formset.dispatch().is_empty());
    }

    #[test]
    fn order_triggers_bound_per_visible_form() {
        let fixture = FormsetFixture::new().with_forms(3).with_order_fields(true);
        let mut doc = fixture.build();
        let formset = init(&mut doc, &fixture.options()).unwrap();
        // Add button + up/down per form.
        assert_eq!(formset.dispatch().len(), 7);
    }
}
