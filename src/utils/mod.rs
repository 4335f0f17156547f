//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`content`] - Binary detection and ASCII case folding for input text
//! - [`line_map`] - Byte offset to line/column resolution
//! - [`progress`] - Progress spinner (no-op without the `progress` feature)

pub mod content;
pub mod line_map;
pub mod progress;

pub use content::*;
pub use line_map::*;
