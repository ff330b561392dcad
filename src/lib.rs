//! # convenient-formsets
//!
//! Client-side synchronization engine for dynamic formsets: repeatable groups
//! of form fields that users add, delete and reorder in place.
//!
//! Every mutation keeps the page consistent for the server that will receive
//! it. Field names, ids and label references are renumbered `0..N`, the
//! `TOTAL_FORMS` management field tracks the number of forms, and the add
//! button is hidden once `MAX_NUM_FORMS` visible forms exist.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed element tree with HTML serialization
//! - **[`host`]**: The [`DomHost`] capability trait the engine runs against
//! - **[`selector`]**: CSS selector subset: tokenizer, parser, matcher
//! - **[`formset`]**: Options, management form, renumbering, mutations, dispatch
//! - **[`error`]**: Initialization errors
//! - **[`testing`]**: Fixture markup and a headless [`Pilot`](testing::Pilot)
//!
//! ## Example
//!
//! ```ignore
//! use convenient_formsets::{ConvenientFormset, FormsetOptions};
//!
//! let options = FormsetOptions::from_json(r##"{
//!     "formsetPrefix": "formset",
//!     "formsContainerSelector": "#formset #forms-container",
//!     "formSelector": ".form",
//!     "emptyFormSelector": "#formset #empty-form .form",
//!     "addFormButtonSelector": "#formset #add-form-button"
//! }"##)?;
//! let mut formset = ConvenientFormset::new(&mut document, &options)?;
//! formset.handle_click(&mut document, clicked);
//! ```

// Foundation
pub mod dom;
pub mod host;
pub mod selector;

// Engine
pub mod error;
pub mod formset;

// Test harness
pub mod testing;

pub use dom::{Document, ElementData, ElementSpec, NodeId};
pub use error::FormsetError;
pub use formset::{ConvenientFormset, FormsetOptions};
pub use host::DomHost;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use convenient_formsets_macros::markup;
