//! The formset engine: configuration, element resolution, renumbering,
//! mutations and click dispatch.

pub mod controller;
pub mod dispatch;
pub mod lifecycle;
pub mod locator;
pub mod management;
pub mod options;
pub mod renumber;
pub mod resolver;

pub use controller::MoveDirection;
pub use dispatch::{DispatchTable, FormAction};
pub use lifecycle::ConvenientFormset;
pub use management::{ManagementForm, MaxForms};
pub use options::{FormsetConfig, FormsetOptions};
