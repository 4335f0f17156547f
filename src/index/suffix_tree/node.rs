//! Text buffer and tree nodes
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`], so
//! suffix links and child edges are plain indices rather than owning pointers.
//! Edge labels are stored as inclusive `(start, end)` ranges into the
//! [`TextBuffer`].

use crate::index::types::{NodeId, Symbol, TextPosition};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// The immutable symbol sequence being indexed.
///
/// The terminator is never stored: position `real_len()` reads as
/// [`Symbol::Terminator`].
#[derive(Debug, Clone)]
pub struct TextBuffer<T> {
    symbols: Vec<T>,
}

impl<T: Clone + Eq + Hash> TextBuffer<T> {
    pub fn new(symbols: Vec<T>) -> Self {
        Self { symbols }
    }

    /// Length including the terminator
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len() + 1
    }

    /// Number of real symbols
    #[inline]
    pub fn real_len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at `pos`, the terminator for `pos == real_len()`
    #[inline]
    pub fn symbol(&self, pos: TextPosition) -> Symbol<T> {
        match self.symbols.get(pos) {
            Some(value) => Symbol::Real(value.clone()),
            None => Symbol::Terminator,
        }
    }

    /// Whether the text holds `value` at `pos` (never true at the terminator)
    #[inline]
    pub fn matches(&self, pos: TextPosition, value: &T) -> bool {
        self.symbols.get(pos) == Some(value)
    }

    /// Whether positions `a` and `b` hold the same symbol
    #[inline]
    pub fn same_symbol(&self, a: TextPosition, b: TextPosition) -> bool {
        match (self.symbols.get(a), self.symbols.get(b)) {
            (Some(x), Some(y)) => x == y,
            (None, None) => true,
            _ => false,
        }
    }

    /// Real symbols in `start..=end`, clamped before the terminator
    pub fn slice(&self, start: TextPosition, end: TextPosition) -> &[T] {
        let stop = (end + 1).min(self.symbols.len());
        let start = start.min(stop);
        &self.symbols[start..stop]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.symbols
    }
}

/// Where an edge label ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// Leaf edge: ends at the shared leaf end of the tree
    Open,
    /// Internal edge: frozen when the node was split off
    Fixed(TextPosition),
    /// The root: no incoming edge, label length zero
    Root,
}

/// A vertex of the suffix tree, labelled by its incoming edge
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) start: TextPosition,
    pub(crate) end: EdgeEnd,
    pub(crate) children: FxHashMap<Symbol<T>, NodeId>,
    pub(crate) link: Option<NodeId>,
    /// Start offset of the suffix spelled out by a leaf
    pub(crate) suffix_start: Option<TextPosition>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self {
            start: 0,
            end: EdgeEnd::Root,
            children: FxHashMap::default(),
            link: None,
            suffix_start: None,
        }
    }

    pub(crate) fn leaf(start: TextPosition, suffix_start: TextPosition) -> Self {
        Self {
            start,
            end: EdgeEnd::Open,
            children: FxHashMap::default(),
            link: None,
            suffix_start: Some(suffix_start),
        }
    }

    pub(crate) fn internal(start: TextPosition, end: TextPosition) -> Self {
        Self {
            start,
            end: EdgeEnd::Fixed(end),
            children: FxHashMap::default(),
            link: None,
            suffix_start: None,
        }
    }

    /// First text position of the incoming edge label.
    ///
    /// The root has no label; use [`Node::edge_length`] or [`Node::is_root`]
    /// before reading a range off it.
    pub fn start(&self) -> TextPosition {
        self.start
    }

    /// Last text position (inclusive) of the incoming edge label,
    /// resolving open leaf edges against `leaf_end`, or `None` for the root
    #[inline]
    pub fn end(&self, leaf_end: TextPosition) -> Option<TextPosition> {
        match self.end {
            EdgeEnd::Open => Some(leaf_end),
            EdgeEnd::Fixed(end) => Some(end),
            EdgeEnd::Root => None,
        }
    }

    /// Number of symbols on the incoming edge (zero for the root)
    #[inline]
    pub fn edge_length(&self, leaf_end: TextPosition) -> usize {
        match self.end(leaf_end) {
            Some(end) => end - self.start + 1,
            None => 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.end, EdgeEnd::Open)
    }

    pub fn is_root(&self) -> bool {
        matches!(self.end, EdgeEnd::Root)
    }

    pub fn children(&self) -> &FxHashMap<Symbol<T>, NodeId> {
        &self.children
    }

    pub fn suffix_link(&self) -> Option<NodeId> {
        self.link
    }

    pub fn suffix_start(&self) -> Option<TextPosition> {
        self.suffix_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_terminator_position() {
        let text = TextBuffer::new(b"ab".to_vec());
        assert_eq!(text.len(), 3);
        assert_eq!(text.real_len(), 2);
        assert_eq!(text.symbol(1), Symbol::Real(b'b'));
        assert_eq!(text.symbol(2), Symbol::Terminator);
        assert!(!text.matches(2, &b'b'));
        assert!(text.same_symbol(2, 2));
        assert!(!text.same_symbol(1, 2));
    }

    #[test]
    fn test_slice_clamps_terminator() {
        let text = TextBuffer::new(b"banana".to_vec());
        assert_eq!(text.slice(2, 4), b"nan");
        assert_eq!(text.slice(4, 6), b"na");
        assert!(text.slice(6, 6).is_empty());
    }

    #[test]
    fn test_open_end_follows_leaf_end() {
        let leaf: Node<u8> = Node::leaf(3, 1);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.end(5), Some(5));
        assert_eq!(leaf.end(9), Some(9));
        assert_eq!(leaf.edge_length(9), 7);

        let internal: Node<u8> = Node::internal(3, 4);
        assert!(!internal.is_leaf());
        assert_eq!(internal.end(9), Some(4));
        assert_eq!(internal.edge_length(9), 2);
    }

    #[test]
    fn test_root_has_no_label() {
        let root: Node<u8> = Node::root();
        assert!(root.is_root());
        assert!(!root.is_leaf());
        assert_eq!(root.end(5), None);
        assert_eq!(root.edge_length(5), 0);
    }
}
