//! Standard formset markup for tests.
//!
//! [`FormsetFixture`] builds the page a server would render for a formset:
//!
//! ```text
//! div#formset
//! ├── div#forms-container
//! │   └── div.form                      (one per form)
//! │       ├── label[for=id_formset-N-user]
//! │       ├── input#id_formset-N-user[name=formset-N-user]
//! │       ├── input[name=formset-N-DELETE]         (delete fields)
//! │       ├── input[name=formset-N-ORDER]          (ordering)
//! │       ├── button.delete-form-button            (delete buttons)
//! │       ├── button.move-form-up-button           (ordering)
//! │       └── button.move-form-down-button         (ordering)
//! ├── div#empty-form[hidden]
//! │   └── div.form                      (same, with `__prefix__`)
//! ├── button#add-form-button
//! └── div#management-form
//!     └── input[name=formset-TOTAL_FORMS] ... (four fields)
//! ```

use crate::dom::{Document, ElementSpec};
use crate::formset::lifecycle::DELETE_MARKER;
use crate::formset::locator::TEMPLATE_PLACEHOLDER;
use crate::formset::management::{INITIAL_FORMS, MAX_NUM_FORMS, MIN_NUM_FORMS, TOTAL_FORMS};
use crate::formset::options::FormsetOptions;

pub const DELETE_BUTTON_SELECTOR: &str = ".delete-form-button";
pub const MOVE_UP_BUTTON_SELECTOR: &str = ".move-form-up-button";
pub const MOVE_DOWN_BUTTON_SELECTOR: &str = ".move-form-down-button";

/// Builder for formset markup and the options matching it.
#[derive(Debug, Clone)]
pub struct FormsetFixture {
    prefix: String,
    forms: usize,
    max_forms: String,
    delete_fields: bool,
    delete_buttons: bool,
    order_fields: bool,
    deleted: Vec<usize>,
    empty_form: bool,
    management_form: bool,
}

impl Default for FormsetFixture {
    fn default() -> Self {
        Self {
            prefix: "formset".to_owned(),
            forms: 0,
            max_forms: "1000".to_owned(),
            delete_fields: false,
            delete_buttons: false,
            order_fields: false,
            deleted: Vec::new(),
            empty_form: true,
            management_form: true,
        }
    }
}

impl FormsetFixture {
    /// No forms, prefix `formset`, maximum 1000.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Number of forms rendered in the container.
    pub fn with_forms(mut self, forms: usize) -> Self {
        self.forms = forms;
        self
    }

    /// Raw `MAX_NUM_FORMS` value.
    pub fn with_max_forms(mut self, max: impl Into<String>) -> Self {
        self.max_forms = max.into();
        self
    }

    /// Render a DELETE field in every form.
    pub fn with_delete_fields(mut self, enabled: bool) -> Self {
        self.delete_fields = enabled;
        self
    }

    /// Render a delete button in every form and enable deleting.
    pub fn with_delete_buttons(mut self, enabled: bool) -> Self {
        self.delete_buttons = enabled;
        self
    }

    /// Render ORDER fields (valued `1..`) and move buttons, and enable ordering.
    pub fn with_order_fields(mut self, enabled: bool) -> Self {
        self.order_fields = enabled;
        self
    }

    /// Forms whose DELETE field already holds the marker. Implies delete fields.
    pub fn with_deleted(mut self, indices: &[usize]) -> Self {
        self.deleted = indices.to_vec();
        self.delete_fields = true;
        self
    }

    pub fn without_empty_form(mut self) -> Self {
        self.empty_form = false;
        self
    }

    pub fn without_management_form(mut self) -> Self {
        self.management_form = false;
        self
    }

    /// Options matching the rendered markup and enabled features.
    pub fn options(&self) -> FormsetOptions {
        let mut options = FormsetOptions::new()
            .with_formset_prefix(self.prefix.clone())
            .with_forms_container_selector("#formset #forms-container")
            .with_form_selector(".form")
            .with_empty_form_selector("#formset #empty-form .form")
            .with_add_form_button_selector("#formset #add-form-button");
        if self.delete_buttons {
            options = options
                .with_can_delete_forms(true)
                .with_delete_form_button_selector(DELETE_BUTTON_SELECTOR);
        }
        if self.order_fields {
            options = options
                .with_can_order_forms(true)
                .with_move_form_up_button_selector(MOVE_UP_BUTTON_SELECTOR)
                .with_move_form_down_button_selector(MOVE_DOWN_BUTTON_SELECTOR);
        }
        options
    }

    /// Markup as a detached element tree.
    pub fn spec(&self) -> ElementSpec {
        let mut formset = ElementSpec::new("div").with_id("formset").with_child(
            ElementSpec::new("div")
                .with_id("forms-container")
                .with_children((0..self.forms).map(|index| self.form(&index.to_string(), Some(index)))),
        );
        if self.empty_form {
            formset = formset.with_child(
                ElementSpec::new("div")
                    .with_id("empty-form")
                    .with_attr("hidden", "")
                    .with_child(self.form(TEMPLATE_PLACEHOLDER, None)),
            );
        }
        formset = formset.with_child(
            ElementSpec::new("button")
                .with_id("add-form-button")
                .with_attr("type", "button"),
        );
        if self.management_form {
            let count = self.forms.to_string();
            formset = formset.with_child(
                ElementSpec::new("div")
                    .with_id("management-form")
                    .with_child(self.management_field(TOTAL_FORMS, &count))
                    .with_child(self.management_field(INITIAL_FORMS, &count))
                    .with_child(self.management_field(MIN_NUM_FORMS, "0"))
                    .with_child(self.management_field(MAX_NUM_FORMS, &self.max_forms)),
            );
        }
        formset
    }

    /// Materialize the markup into a new document.
    pub fn build(&self) -> Document {
        let mut doc = Document::new();
        doc.build(None, self.spec());
        doc
    }

    /// One form; `index` is `None` for the template.
    fn form(&self, token: &str, index: Option<usize>) -> ElementSpec {
        let name = |field: &str| format!("{}-{token}-{field}", self.prefix);
        let mut form = ElementSpec::new("div")
            .with_class("form")
            .with_child(ElementSpec::new("label").with_attr("for", format!("id_{}", name("user"))))
            .with_child(
                ElementSpec::new("input")
                    .with_attr("type", "text")
                    .with_attr("name", name("user"))
                    .with_id(format!("id_{}", name("user"))),
            );
        if let Some(index) = index {
            form.children[1].data.set_attr("value", format!("user {index}"));
        }
        if self.delete_fields {
            let marked = index.is_some_and(|index| self.deleted.contains(&index));
            form = form.with_child(
                ElementSpec::new("input")
                    .with_attr("type", "hidden")
                    .with_attr("name", name("DELETE"))
                    .with_id(format!("id_{}", name("DELETE")))
                    .with_attr("value", if marked { DELETE_MARKER } else { "" }),
            );
        }
        if self.order_fields {
            let order = index.map(|index| (index + 1).to_string()).unwrap_or_default();
            form = form.with_child(
                ElementSpec::new("input")
                    .with_attr("type", "hidden")
                    .with_attr("name", name("ORDER"))
                    .with_id(format!("id_{}", name("ORDER")))
                    .with_attr("value", order),
            );
        }
        if self.delete_buttons {
            form = form.with_child(button("delete-form-button"));
        }
        if self.order_fields {
            form = form
                .with_child(button("move-form-up-button"))
                .with_child(button("move-form-down-button"));
        }
        form
    }

    fn management_field(&self, field: &str, value: &str) -> ElementSpec {
        ElementSpec::new("input")
            .with_attr("type", "hidden")
            .with_attr("name", format!("{}-{field}", self.prefix))
            .with_attr("value", value)
    }
}

fn button(class: &str) -> ElementSpec {
    ElementSpec::new("button")
        .with_attr("type", "button")
        .with_class(class)
}
