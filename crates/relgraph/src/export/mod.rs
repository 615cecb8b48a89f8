//! Export module for inspecting graphs in external tools.
//!
//! Supports two formats:
//! - **DOT**: Graphviz visualization
//! - **JSON**: snapshots for web tools and debugging

pub mod dot;
pub mod json;

pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::{export_json, export_json_filtered};
