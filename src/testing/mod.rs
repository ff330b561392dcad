//! Headless testing framework: fixture markup, Pilot, snapshot helpers.
//!
//! Use [`FormsetFixture`] to render the standard formset markup, the
//! [`Pilot`] to click through it, and [`forms_to_string`] to capture the
//! resulting forms as plain text for snapshot-style assertions.

pub mod fixture;
pub mod pilot;
pub mod snapshot;

pub use fixture::FormsetFixture;
pub use pilot::Pilot;
pub use snapshot::forms_to_string;
