//! Initialization errors.
//!
//! Every message carries the `[ConvenientFormset]` tag so several formsets on
//! one page can be told apart in logs. Only construction fails; add, remove
//! and move absorb invalid states as no-ops.

use crate::selector::SelectorError;

/// Tag prepended to every error message.
pub const ERROR_TAG: &str = "[ConvenientFormset]";

/// Failure to initialize a [`ConvenientFormset`](crate::ConvenientFormset).
#[derive(Debug, thiserror::Error)]
pub enum FormsetError {
    /// Required options absent, in declaration order.
    #[error("{} Missing required options: {}", ERROR_TAG, backticked(.0))]
    MissingOptions(Vec<&'static str>),

    /// The options object could not be deserialized.
    #[error("{} Invalid options: {}", ERROR_TAG, .0)]
    InvalidOptions(#[from] serde_json::Error),

    /// A configured selector does not parse.
    #[error(
        "{} Invalid selector `{}` for option `{}`: {}",
        ERROR_TAG,
        .selector,
        .option,
        .source
    )]
    InvalidSelector {
        option: &'static str,
        selector: String,
        #[source]
        source: SelectorError,
    },

    /// Configured locators that resolved to nothing.
    #[error("{} Unable to find DOM element with selectors: {}", ERROR_TAG, backticked(.0))]
    MissingElements(Vec<String>),

    /// One or more of the four management fields is absent. Which one is
    /// intentionally not reported.
    #[error(
        "{} Management form for formset with prefix `{}` missing or has been tampered with.",
        ERROR_TAG,
        .prefix
    )]
    ManagementForm { prefix: String },

    /// Feature triggers or fields missing from the empty-form template.
    #[error(
        "{} Unable to find DOM elements in empty form with selectors: {}",
        ERROR_TAG,
        backticked(.0)
    )]
    MissingEmptyFormElements(Vec<String>),

    /// Feature triggers or fields missing from at least one visible form.
    #[error(
        "{} Unable to find DOM elements in forms with selectors: {}",
        ERROR_TAG,
        backticked(.0)
    )]
    MissingFormElements(Vec<String>),
}

/// `` `a`, `b`, `c` ``
fn backticked<T: AsRef<str>>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("`{}`", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
