//! Document arena: slotmap-backed element tree with selector queries.

pub mod html;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{ElementData, ElementSpec, NodeId};
pub use tree::Document;
