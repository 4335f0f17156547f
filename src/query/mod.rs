//! Query execution over a built text index.
//!
//! - [`executor`] - Runs patterns against a [`TextIndex`](crate::index::TextIndex)
//!   and resolves offsets to line-level matches

pub mod executor;

pub use executor::{PatternResult, QueryExecutor, TextMatch};
