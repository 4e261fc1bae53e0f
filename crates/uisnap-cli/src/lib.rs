//! CLI library components for the uisnap tool.

pub mod logging;
pub mod pipeline;
