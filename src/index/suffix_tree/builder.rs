//! Suffix tree builder
//!
//! Builds a suffix tree online with Ukkonen's algorithm:
//! 1. One phase per text position (terminator included)
//! 2. Every open leaf grows implicitly by advancing one shared end cell
//! 3. Pending suffixes are inserted explicitly from the active point,
//!    hopping between extensions along suffix links
//!
//! Total work is O(n) amortized over the whole text.

use super::node::{Node, TextBuffer};
use crate::index::types::{NodeId, ROOT, Symbol, TextPosition};
use std::cell::Cell;
use std::hash::Hash;

/// Where the next pending suffix has to be inserted
#[derive(Debug, Clone, Copy)]
struct ActivePoint {
    node: NodeId,
    /// Text position whose symbol selects the outgoing edge
    edge: TextPosition,
    /// How many symbols along that edge the point sits
    length: usize,
}

/// Builder driving one Ukkonen phase per text position
pub struct TreeBuilder<T> {
    text: TextBuffer<T>,
    nodes: Vec<Node<T>>,
    active: ActivePoint,
    /// Suffixes of the current prefix still waiting for explicit insertion
    remaining: usize,
    /// Inclusive end shared by every open leaf
    leaf_end: Cell<TextPosition>,
    /// Internal node split in this phase that still needs its suffix link
    last_split: Option<NodeId>,
}

impl<T: Clone + Eq + Hash> TreeBuilder<T> {
    /// Create a builder over `symbols`; the terminator is implicit
    pub fn new(symbols: Vec<T>) -> Self {
        let text = TextBuffer::new(symbols);
        // Roughly n leaves plus at most n - 1 internal nodes
        let mut nodes = Vec::with_capacity(text.len() * 2);
        nodes.push(Node::root());

        Self {
            text,
            nodes,
            active: ActivePoint {
                node: ROOT,
                edge: 0,
                length: 0,
            },
            remaining: 0,
            leaf_end: Cell::new(0),
            last_split: None,
        }
    }

    /// Run every phase and freeze the tree
    pub fn build(mut self) -> SuffixTree<T> {
        // An empty text stays a lone root; no terminator leaf is added
        if !self.text.is_empty() {
            for pos in 0..self.text.len() {
                self.extend(pos);
            }
            debug_assert_eq!(self.remaining, 0, "terminator must flush every suffix");
        }

        let leaf_end = self.leaf_end.get();
        SuffixTree {
            text: self.text,
            nodes: self.nodes,
            leaf_end,
        }
    }

    /// One phase: make every suffix of `text[..=pos]` present in the tree
    fn extend(&mut self, pos: TextPosition) {
        // Rule 1 for every existing leaf at once
        self.leaf_end.set(pos);
        self.remaining += 1;
        self.last_split = None;

        while self.remaining > 0 {
            if self.active.length == 0 {
                self.active.edge = pos;
            }

            let edge_symbol = self.text.symbol(self.active.edge);
            let existing = self.nodes[self.active.node as usize]
                .children
                .get(&edge_symbol)
                .copied();

            match existing {
                None => {
                    // Rule 2: new leaf straight off the active node
                    let leaf = self.push_node(Node::leaf(pos, pos + 1 - self.remaining));
                    self.nodes[self.active.node as usize]
                        .children
                        .insert(edge_symbol, leaf);
                    self.link_pending(self.active.node);
                }
                Some(next) => {
                    if self.walk_down(next) {
                        continue;
                    }

                    let probe = self.nodes[next as usize].start + self.active.length;
                    if self.text.same_symbol(probe, pos) {
                        // Rule 3: this suffix and all shorter ones are already present
                        self.link_pending(self.active.node);
                        self.active.length += 1;
                        break;
                    }

                    let split = self.split_edge(edge_symbol, next, pos);
                    if let Some(previous) = self.last_split.replace(split) {
                        self.nodes[previous as usize].link = Some(split);
                    }
                }
            }

            self.remaining -= 1;

            if self.active.node == ROOT && self.active.length > 0 {
                self.active.length -= 1;
                self.active.edge = pos + 1 - self.remaining;
            } else if self.active.node != ROOT {
                self.active.node = self.nodes[self.active.node as usize]
                    .link
                    .unwrap_or(ROOT);
            }
        }
    }

    /// Skip/count descent: hop over `next` when the active length spans its
    /// whole edge. Returns `true` if the active point moved.
    fn walk_down(&mut self, next: NodeId) -> bool {
        let length = self.edge_length(next);
        if self.active.length >= length {
            self.active.node = next;
            self.active.edge += length;
            self.active.length -= length;
            true
        } else {
            false
        }
    }

    /// Rule 2 with a split: cut the edge to `next` at the active point, hang
    /// a new leaf for `pos` off the cut and return the new internal node
    fn split_edge(&mut self, edge_symbol: Symbol<T>, next: NodeId, pos: TextPosition) -> NodeId {
        let split_start = self.nodes[next as usize].start;
        let split_end = split_start + self.active.length - 1;
        let split = self.push_node(Node::internal(split_start, split_end));
        self.nodes[self.active.node as usize]
            .children
            .insert(edge_symbol, split);

        let leaf = self.push_node(Node::leaf(pos, pos + 1 - self.remaining));
        let leaf_symbol = self.text.symbol(pos);
        self.nodes[split as usize].children.insert(leaf_symbol, leaf);

        self.nodes[next as usize].start += self.active.length;
        let moved_symbol = self.text.symbol(self.nodes[next as usize].start);
        self.nodes[split as usize].children.insert(moved_symbol, next);

        split
    }

    /// Point a split created earlier in this phase at `target`
    fn link_pending(&mut self, target: NodeId) {
        if let Some(pending) = self.last_split.take() {
            self.nodes[pending as usize].link = Some(target);
        }
    }

    fn edge_length(&self, id: NodeId) -> usize {
        self.nodes[id as usize].edge_length(self.leaf_end.get())
    }

    fn push_node(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId::try_from(self.nodes.len())
            .expect("suffix tree exceeds u32::MAX nodes (text longer than about 2^31 symbols)");
        self.nodes.push(node);
        id
    }
}

/// A finished, immutable suffix tree.
///
/// Queries take `&self` and may run concurrently; a changed text needs a
/// fresh [`SuffixTree::build`].
#[derive(Debug, Clone)]
pub struct SuffixTree<T> {
    pub(crate) text: TextBuffer<T>,
    pub(crate) nodes: Vec<Node<T>>,
    /// Frozen end of every leaf edge
    pub(crate) leaf_end: TextPosition,
}

impl<T: Clone + Eq + Hash> SuffixTree<T> {
    /// Build a suffix tree over `symbols` in linear time
    ///
    /// # Panics
    ///
    /// Node handles are `u32`, and a text of `n` symbols needs up to `2n + 1`
    /// nodes, so texts longer than about 2^31 symbols are not supported.
    /// Cap input size beforehand (as `TextIndex` does with `max_text_size`).
    pub fn build(symbols: impl Into<Vec<T>>) -> Self {
        TreeBuilder::new(symbols.into()).build()
    }

    /// The indexed text, terminator excluded
    pub fn text(&self) -> &[T] {
        self.text.as_slice()
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[ROOT as usize]
    }

    /// Number of symbols on the incoming edge of `id` (zero for the root)
    pub fn edge_length(&self, id: NodeId) -> usize {
        self.nodes[id as usize].edge_length(self.leaf_end)
    }

    /// Real symbols of the edge label into `id`, and whether the label
    /// finishes with the terminator
    pub fn edge_label(&self, id: NodeId) -> (&[T], bool) {
        let node = &self.nodes[id as usize];
        let Some(end) = node.end(self.leaf_end) else {
            return (&[], false);
        };
        let terminated = end >= self.text.real_len();
        (self.text.slice(node.start, end), terminated)
    }
}
