//! Proc macros for convenient-formsets: `markup!` element trees.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on
//! `convenient-formsets` instead.

use proc_macro::TokenStream;

mod markup_macro;

/// HTML-like element tree macro.
///
/// Expands to a `Vec<convenient_formsets::dom::ElementSpec>`, one entry per
/// top-level element, ready for `Document::build`.
///
/// # Syntax
///
/// - `<tag />`: self-closing element (no children)
/// - `<tag attr="val"> ... </tag>`: element with children
///
/// # Attributes
///
/// - `name="value"` becomes `.with_attr("name", "value")`
/// - names may be keywords (`for`, `type`) or hyphenated (`data-role`)
/// - a bare `name` (e.g. `hidden`) gets an empty value
///
/// # Example
///
/// ```ignore
/// markup! {
///     <div id="forms-container">
///         <div class="form">
///             <label for="id_formset-0-user"></label>
///             <input type="text" name="formset-0-user" id="id_formset-0-user" />
///         </div>
///     </div>
///     <button id="add-form-button" hidden />
/// }
/// ```
#[proc_macro]
pub fn markup(input: TokenStream) -> TokenStream {
    markup_macro::markup_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
