use serde::{Deserialize, Serialize};

/// Handle of a node in the suffix tree arena
pub type NodeId = u32;

/// Offset into the indexed text (in symbols)
pub type TextPosition = usize;

/// The root is always the first node in the arena
pub const ROOT: NodeId = 0;

/// One symbol of an indexed text.
///
/// Every text is conceptually followed by a single [`Symbol::Terminator`]
/// that compares unequal to every real symbol, so each suffix ends at its
/// own leaf. Variant order makes the terminator sort after all real symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol<T> {
    Real(T),
    Terminator,
}

impl<T> Symbol<T> {
    pub fn is_terminator(&self) -> bool {
        matches!(self, Symbol::Terminator)
    }

    pub fn as_real(&self) -> Option<&T> {
        match self {
            Symbol::Real(value) => Some(value),
            Symbol::Terminator => None,
        }
    }
}

/// Configuration for building a text index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Fold ASCII letters to lowercase in both text and queries (default: false)
    pub case_insensitive: bool,
    /// Largest text accepted for indexing, in bytes (default: 64MB)
    pub max_text_size: u64,
    /// Index content that looks binary instead of rejecting it (default: false)
    pub allow_binary: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            max_text_size: 64 * 1024 * 1024, // 64MB
            allow_binary: false,
        }
    }
}

/// Summary of a built index, reported by `stx stats`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexMeta {
    /// Where the text came from (file path or `-` for stdin)
    pub source: String,
    /// Number of indexed bytes (terminator excluded)
    pub text_size: u64,
    /// Number of lines in the text
    pub line_count: u64,
    /// Total nodes including the root
    pub node_count: u64,
    /// Leaves, one per suffix including the terminator suffix
    pub leaf_count: u64,
    /// Internal (branching) nodes, root excluded
    pub internal_count: u64,
    /// Longest root-to-leaf path, in edges
    pub max_depth: u64,
    /// Settings the index was built with
    pub config: IndexConfig,
    /// Construction time in milliseconds
    pub build_millis: u64,
}
