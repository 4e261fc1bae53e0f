//! Query engine for parsed UI snapshots.
//!
//! [`engine`] answers attribute-condition queries over a [`uisnap_model::Snapshot`];
//! [`stats`] derives the aggregate figures shown by summary output.

pub mod engine;
pub mod stats;

pub use engine::find_elements;
pub use stats::{TYPE_ATTRIBUTE, UNTYPED_LABEL, max_depth, type_counts};
