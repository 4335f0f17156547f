//! # STX - Suffix Tree Index
//!
//! STX builds a suffix tree over a text in linear time (Ukkonen's online
//! algorithm) and then answers "does this substring occur, and where" in time
//! proportional to the length of the query.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix tree construction and lookup, plus [`index::TextIndex`]
//!   for byte texts read from files or stdin
//! - [`query`] - Resolving matches to lines, parallel pattern batches
//! - [`output`] - Result formatting (ripgrep-compatible)
//! - [`utils`] - Line maps, binary detection, progress spinner
//!
//! ## Quick Start
//!
//! ```
//! use stx::index::SuffixTree;
//!
//! let tree = SuffixTree::build(b"banana".to_vec());
//! assert_eq!(tree.find(b"ana"), vec![1, 3]);
//! assert!(tree.find(b"xyz").is_empty());
//! ```
//!
//! Any `Clone + Eq + Hash` symbol works, not just bytes:
//!
//! ```
//! use stx::index::SuffixTree;
//!
//! let words = vec!["to", "be", "or", "not", "to", "be"];
//! let tree = SuffixTree::build(words);
//! assert_eq!(tree.find(&["to", "be"]), vec![0, 4]);
//! ```
//!
//! ## Lifecycle
//!
//! A tree is immutable once built. Queries borrow it shared and may run on
//! many threads at once; when the text changes, build a new tree.

pub mod index;
pub mod output;
pub mod query;
pub mod utils;
