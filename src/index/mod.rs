pub mod build;
pub mod stats;
pub mod suffix_tree;
pub mod types;

pub use build::TextIndex;
pub use suffix_tree::SuffixTree;
pub use types::*;
