//! Suffix tree indexing module
//!
//! This module answers "does this substring occur, and where" in time
//! proportional to the query, after a linear-time construction pass.
//!
//! ## Architecture
//!
//! - `node`: Text buffer and arena nodes (edge labels are text ranges)
//! - `builder`: Ukkonen's online construction
//! - `query`: Substring lookup, leaf collection and invariant checks
//!
//! ## Lifecycle
//!
//! A tree is built once and never mutated afterwards. Any number of readers
//! can query it concurrently; a changed text is indexed from scratch.

pub mod builder;
pub mod node;
pub mod query;

// Re-exports for convenience
pub use builder::{SuffixTree, TreeBuilder};
pub use node::{EdgeEnd, Node, TextBuffer};
pub use query::TreeStats;
