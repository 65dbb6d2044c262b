//! Terminal and machine-readable output

pub mod json;
pub mod output;
pub mod views;

pub use json::JsonEventSink;
pub use output::{Icon, OutputStyle, SemanticColor};
