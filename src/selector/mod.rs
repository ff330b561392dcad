//! Selector engine: tokenizer, parser, AST, matching.
//!
//! Covers the subset of CSS selectors formset configurations use: type,
//! universal, `#id`, `.class`, attribute selectors, `:not(...)`, descendant and
//! child combinators, and comma-separated lists.

pub mod matching;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use model::{
    AttributeOperator, Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList,
    SelectorPart,
};
pub use parser::{parse_selector_list, SelectorError};
