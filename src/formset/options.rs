//! Constructor options and their validation into an immutable [`FormsetConfig`].
//!
//! [`FormsetOptions`] mirrors the options object a page passes in: every key is
//! optional at the type level, and [`FormsetOptions::validate`] enforces which
//! ones are required, either always or only when a feature flag is on.

use serde::Deserialize;

use crate::error::FormsetError;
use crate::selector::{parse_selector_list, SelectorList};

// ---------------------------------------------------------------------------
// Option keys
// ---------------------------------------------------------------------------

pub const FORMSET_PREFIX: &str = "formsetPrefix";
pub const FORMS_CONTAINER_SELECTOR: &str = "formsContainerSelector";
pub const FORM_SELECTOR: &str = "formSelector";
pub const CAN_ADD_FORMS: &str = "canAddForms";
pub const EMPTY_FORM_SELECTOR: &str = "emptyFormSelector";
pub const ADD_FORM_BUTTON_SELECTOR: &str = "addFormButtonSelector";
pub const HIDE_ADD_FORM_BUTTON_ON_MAX_FORMS: &str = "hideAddFormButtonOnMaxForms";
pub const CAN_DELETE_FORMS: &str = "canDeleteForms";
pub const DELETE_FORM_BUTTON_SELECTOR: &str = "deleteFormButtonSelector";
pub const CAN_ORDER_FORMS: &str = "canOrderForms";
pub const MOVE_FORM_UP_BUTTON_SELECTOR: &str = "moveFormUpButtonSelector";
pub const MOVE_FORM_DOWN_BUTTON_SELECTOR: &str = "moveFormDownButtonSelector";

// ---------------------------------------------------------------------------
// FormsetOptions
// ---------------------------------------------------------------------------

/// Raw constructor options. `None` means the key was not given.
///
/// Deserializes from the camelCase object a page would pass; `null` counts as
/// absent and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormsetOptions {
    pub formset_prefix: Option<String>,
    pub forms_container_selector: Option<String>,
    pub form_selector: Option<String>,
    pub can_add_forms: Option<bool>,
    pub empty_form_selector: Option<String>,
    pub add_form_button_selector: Option<String>,
    pub hide_add_form_button_on_max_forms: Option<bool>,
    pub can_delete_forms: Option<bool>,
    pub delete_form_button_selector: Option<String>,
    pub can_order_forms: Option<bool>,
    pub move_form_up_button_selector: Option<String>,
    pub move_form_down_button_selector: Option<String>,
}

impl FormsetOptions {
    /// Create options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, FormsetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, FormsetError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_formset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.formset_prefix = Some(prefix.into());
        self
    }

    pub fn with_forms_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.forms_container_selector = Some(selector.into());
        self
    }

    pub fn with_form_selector(mut self, selector: impl Into<String>) -> Self {
        self.form_selector = Some(selector.into());
        self
    }

    pub fn with_can_add_forms(mut self, enabled: bool) -> Self {
        self.can_add_forms = Some(enabled);
        self
    }

    pub fn with_empty_form_selector(mut self, selector: impl Into<String>) -> Self {
        self.empty_form_selector = Some(selector.into());
        self
    }

    pub fn with_add_form_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.add_form_button_selector = Some(selector.into());
        self
    }

    pub fn with_hide_add_form_button_on_max_forms(mut self, enabled: bool) -> Self {
        self.hide_add_form_button_on_max_forms = Some(enabled);
        self
    }

    pub fn with_can_delete_forms(mut self, enabled: bool) -> Self {
        self.can_delete_forms = Some(enabled);
        self
    }

    pub fn with_delete_form_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.delete_form_button_selector = Some(selector.into());
        self
    }

    pub fn with_can_order_forms(mut self, enabled: bool) -> Self {
        self.can_order_forms = Some(enabled);
        self
    }

    pub fn with_move_form_up_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.move_form_up_button_selector = Some(selector.into());
        self
    }

    pub fn with_move_form_down_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.move_form_down_button_selector = Some(selector.into());
        self
    }

    // ── Effective flags ──────────────────────────────────────────────

    pub fn can_add(&self) -> bool {
        self.can_add_forms.unwrap_or(true)
    }

    pub fn hide_add_button_on_max(&self) -> bool {
        self.hide_add_form_button_on_max_forms.unwrap_or(true)
    }

    pub fn can_delete(&self) -> bool {
        self.can_delete_forms.unwrap_or(false)
    }

    pub fn can_order(&self) -> bool {
        self.can_order_forms.unwrap_or(false)
    }

    /// Check required keys and parse every selector.
    ///
    /// All missing keys are reported together, in declaration order.
    pub fn validate(&self) -> Result<FormsetConfig, FormsetError> {
        let missing: Vec<&'static str> = REQUIRED_OPTIONS
            .iter()
            .filter(|spec| spec.is_required(self) && (spec.value)(self).is_none())
            .map(|spec| spec.key)
            .collect();
        if !missing.is_empty() {
            return Err(FormsetError::MissingOptions(missing));
        }

        let prefix = self.formset_prefix.clone().unwrap_or_default();
        let forms_container = self.selector(FORMS_CONTAINER_SELECTOR, &self.forms_container_selector)?;
        let form = self.selector(FORM_SELECTOR, &self.form_selector)?;

        let add = if self.can_add() {
            Some(AddConfig {
                empty_form: self.selector(EMPTY_FORM_SELECTOR, &self.empty_form_selector)?,
                add_button: self.selector(ADD_FORM_BUTTON_SELECTOR, &self.add_form_button_selector)?,
                hide_on_max: self.hide_add_button_on_max(),
            })
        } else {
            None
        };

        let delete = if self.can_delete() {
            Some(self.selector(DELETE_FORM_BUTTON_SELECTOR, &self.delete_form_button_selector)?)
        } else {
            None
        };

        let order = if self.can_order() {
            Some(OrderConfig {
                move_up: self.selector(MOVE_FORM_UP_BUTTON_SELECTOR, &self.move_form_up_button_selector)?,
                move_down: self.selector(
                    MOVE_FORM_DOWN_BUTTON_SELECTOR,
                    &self.move_form_down_button_selector,
                )?,
            })
        } else {
            None
        };

        Ok(FormsetConfig {
            prefix,
            forms_container,
            form,
            add,
            delete,
            order,
        })
    }

    fn selector(
        &self,
        option: &'static str,
        value: &Option<String>,
    ) -> Result<ConfiguredSelector, FormsetError> {
        ConfiguredSelector::parse(option, value.as_deref().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Requirement table
// ---------------------------------------------------------------------------

/// When a string option must be present.
#[derive(Clone, Copy)]
enum Requirement {
    Always,
    When(fn(&FormsetOptions) -> bool),
}

struct OptionSpec {
    key: &'static str,
    requirement: Requirement,
    value: fn(&FormsetOptions) -> Option<&str>,
}

impl OptionSpec {
    fn is_required(&self, options: &FormsetOptions) -> bool {
        match self.requirement {
            Requirement::Always => true,
            Requirement::When(flag) => flag(options),
        }
    }
}

/// String options in declaration order. Boolean options all have defaults
/// and are never missing.
const REQUIRED_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        key: FORMSET_PREFIX,
        requirement: Requirement::Always,
        value: |o| o.formset_prefix.as_deref(),
    },
    OptionSpec {
        key: FORMS_CONTAINER_SELECTOR,
        requirement: Requirement::Always,
        value: |o| o.forms_container_selector.as_deref(),
    },
    OptionSpec {
        key: FORM_SELECTOR,
        requirement: Requirement::Always,
        value: |o| o.form_selector.as_deref(),
    },
    OptionSpec {
        key: EMPTY_FORM_SELECTOR,
        requirement: Requirement::When(FormsetOptions::can_add),
        value: |o| o.empty_form_selector.as_deref(),
    },
    OptionSpec {
        key: ADD_FORM_BUTTON_SELECTOR,
        requirement: Requirement::When(FormsetOptions::can_add),
        value: |o| o.add_form_button_selector.as_deref(),
    },
    OptionSpec {
        key: DELETE_FORM_BUTTON_SELECTOR,
        requirement: Requirement::When(FormsetOptions::can_delete),
        value: |o| o.delete_form_button_selector.as_deref(),
    },
    OptionSpec {
        key: MOVE_FORM_UP_BUTTON_SELECTOR,
        requirement: Requirement::When(FormsetOptions::can_order),
        value: |o| o.move_form_up_button_selector.as_deref(),
    },
    OptionSpec {
        key: MOVE_FORM_DOWN_BUTTON_SELECTOR,
        requirement: Requirement::When(FormsetOptions::can_order),
        value: |o| o.move_form_down_button_selector.as_deref(),
    },
];

// ---------------------------------------------------------------------------
// FormsetConfig
// ---------------------------------------------------------------------------

/// A selector option after parsing, keeping its source text for messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredSelector {
    pub option: &'static str,
    pub source: String,
    pub selectors: SelectorList,
}

impl ConfiguredSelector {
    pub fn parse(option: &'static str, source: &str) -> Result<Self, FormsetError> {
        let selectors =
            parse_selector_list(source).map_err(|source_err| FormsetError::InvalidSelector {
                option,
                selector: source.to_owned(),
                source: source_err,
            })?;
        Ok(Self {
            option,
            source: source.to_owned(),
            selectors,
        })
    }
}

/// Locators and flags for adding forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddConfig {
    pub empty_form: ConfiguredSelector,
    pub add_button: ConfiguredSelector,
    pub hide_on_max: bool,
}

/// Locators for the move triggers of orderable forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    pub move_up: ConfiguredSelector,
    pub move_down: ConfiguredSelector,
}

/// Validated, immutable configuration. A disabled feature has no locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormsetConfig {
    pub prefix: String,
    pub forms_container: ConfiguredSelector,
    pub form: ConfiguredSelector,
    pub add: Option<AddConfig>,
    /// Delete trigger, when deleting is enabled.
    pub delete: Option<ConfiguredSelector>,
    pub order: Option<OrderConfig>,
}

impl FormsetConfig {
    pub fn can_add(&self) -> bool {
        self.add.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.delete.is_some()
    }

    pub fn can_order(&self) -> bool {
        self.order.is_some()
    }

    /// Whether the add button is hidden once the maximum is reached.
    pub fn hides_add_button(&self) -> bool {
        self.add.as_ref().is_some_and(|add| add.hide_on_max)
    }
}
