//! Resolution of configured selectors to document elements.
//!
//! Lookups collect every miss before failing so one error names all of them.

use crate::error::FormsetError;
use crate::formset::options::{ConfiguredSelector, FormsetConfig};
use crate::host::DomHost;
use crate::selector::{AttributeOperator, SelectorList};

/// Name suffix of the soft-delete marker field.
pub const DELETE_FIELD_SUFFIX: &str = "DELETE";

/// Name suffix of the order field.
pub const ORDER_FIELD_SUFFIX: &str = "ORDER";

/// `input[name$="DELETE"]`
pub fn delete_field_selector() -> SelectorList {
    SelectorList::tag_with_attribute(
        "input",
        "name",
        AttributeOperator::EndsWith(DELETE_FIELD_SUFFIX.to_owned()),
    )
}

/// `input[name$="ORDER"]`
pub fn order_field_selector() -> SelectorList {
    SelectorList::tag_with_attribute(
        "input",
        "name",
        AttributeOperator::EndsWith(ORDER_FIELD_SUFFIX.to_owned()),
    )
}

/// Document-level elements of a formset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormsetElements<N> {
    pub forms_container: N,
    /// Present when adding is enabled.
    pub add: Option<AddElements<N>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddElements<N> {
    /// The empty form cloned for every new form.
    pub template: N,
    pub add_button: N,
}

/// Resolve the container and, when adding is enabled, the template and the
/// add button. Misses are reported in that order.
pub fn resolve_elements<H: DomHost>(
    host: &H,
    config: &FormsetConfig,
) -> Result<FormsetElements<H::Node>, FormsetError> {
    let mut missing = Vec::new();
    let mut find = |selector: &ConfiguredSelector| {
        let found = host.query_selector(None, &selector.selectors);
        if found.is_none() {
            missing.push(selector.source.clone());
        }
        found
    };

    let forms_container = find(&config.forms_container);
    let add = config
        .add
        .as_ref()
        .map(|add| (find(&add.empty_form), find(&add.add_button)));

    match (forms_container, add) {
        (Some(forms_container), None) => Ok(FormsetElements {
            forms_container,
            add: None,
        }),
        (Some(forms_container), Some((Some(template), Some(add_button)))) => Ok(FormsetElements {
            forms_container,
            add: Some(AddElements {
                template,
                add_button,
            }),
        }),
        _ => Err(FormsetError::MissingElements(missing)),
    }
}

/// A sub-element every form must contain for the enabled features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequirement {
    /// Text shown in error messages.
    pub source: String,
    pub selectors: SelectorList,
}

/// Sub-elements required in each form: the delete trigger when deleting is
/// enabled, and both move triggers plus the order field when ordering is.
pub fn form_requirements(config: &FormsetConfig) -> Vec<FormRequirement> {
    let from_option = |selector: &ConfiguredSelector| FormRequirement {
        source: selector.source.clone(),
        selectors: selector.selectors.clone(),
    };

    let mut requirements = Vec::new();
    if let Some(delete) = &config.delete {
        requirements.push(from_option(delete));
    }
    if let Some(order) = &config.order {
        requirements.push(from_option(&order.move_up));
        requirements.push(from_option(&order.move_down));
        let order_field = order_field_selector();
        requirements.push(FormRequirement {
            source: order_field.to_string(),
            selectors: order_field,
        });
    }
    requirements
}

/// Requirements not satisfied inside any of `forms`, deduplicated in
/// first-seen order.
pub fn missing_in_forms<H: DomHost>(
    host: &H,
    forms: &[H::Node],
    requirements: &[FormRequirement],
) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for &form in forms {
        for requirement in requirements {
            if host.query_selector(Some(form), &requirement.selectors).is_none()
                && !missing.contains(&requirement.source)
            {
                missing.push(requirement.source.clone());
            }
        }
    }
    missing
}
