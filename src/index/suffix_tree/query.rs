//! Substring lookup over a finished suffix tree
//!
//! A query walks edge by edge from the root, then gathers the suffix start
//! of every leaf below the match point. Each leaf is one suffix, so every
//! occurrence is reported exactly once.

use super::builder::SuffixTree;
use crate::index::types::{NodeId, ROOT, Symbol, TextPosition};
use anyhow::{Result, bail};
use std::hash::Hash;
use std::ops::Range;

/// Shape summary of a suffix tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Real symbols indexed, terminator excluded
    pub text_len: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Longest root-to-leaf path, in edges
    pub max_depth: usize,
}

impl<T: Clone + Eq + Hash> SuffixTree<T> {
    /// Node directly below the point where `query` ends, or `None` if the
    /// query does not occur. The empty query never occurs.
    fn locate(&self, query: &[T]) -> Option<NodeId> {
        if query.is_empty() || query.len() > self.text.real_len() {
            return None;
        }

        let mut node = ROOT;
        let mut matched = 0;

        loop {
            let symbol = Symbol::Real(query[matched].clone());
            let child = *self.nodes[node as usize].children.get(&symbol)?;

            let start = self.nodes[child as usize].start;
            let take = self.edge_length(child).min(query.len() - matched);

            // The first symbol already matched through the child lookup
            for k in 1..take {
                if !self.text.matches(start + k, &query[matched + k]) {
                    return None;
                }
            }

            matched += take;
            if matched == query.len() {
                return Some(child);
            }
            node = child;
        }
    }

    /// Every start offset of `query`, in ascending order
    pub fn find(&self, query: &[T]) -> Vec<TextPosition> {
        let mut offsets = self.find_unsorted(query);
        offsets.sort_unstable();
        offsets
    }

    /// Every start offset of `query`, in tree order
    pub fn find_unsorted(&self, query: &[T]) -> Vec<TextPosition> {
        match self.locate(query) {
            Some(node) => self.collect_leaves(node),
            None => Vec::new(),
        }
    }

    /// Occurrences as half-open ranges, ascending
    pub fn find_spans(&self, query: &[T]) -> Vec<Range<TextPosition>> {
        self.find(query)
            .into_iter()
            .map(|start| start..start + query.len())
            .collect()
    }

    /// Whether `query` occurs at all (no leaf collection)
    pub fn contains(&self, query: &[T]) -> bool {
        self.locate(query).is_some()
    }

    /// Number of occurrences of `query`
    pub fn count(&self, query: &[T]) -> usize {
        match self.locate(query) {
            Some(node) => self.leaves_below(node).count(),
            None => 0,
        }
    }

    fn collect_leaves(&self, node: NodeId) -> Vec<TextPosition> {
        self.leaves_below(node)
            .filter_map(|leaf| self.nodes[leaf as usize].suffix_start)
            .collect()
    }

    /// Leaves of the subtree rooted at `node`, walked with an explicit stack
    fn leaves_below(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![node];
        std::iter::from_fn(move || {
            while let Some(id) = stack.pop() {
                let current = &self.nodes[id as usize];
                if current.is_leaf() {
                    return Some(id);
                }
                stack.extend(current.children.values().copied());
            }
            None
        })
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            text_len: self.text.real_len(),
            node_count: self.nodes.len(),
            ..Default::default()
        };

        let mut stack = vec![(ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id as usize];
            if node.is_leaf() {
                stats.leaf_count += 1;
                stats.max_depth = stats.max_depth.max(depth);
            } else if id != ROOT {
                stats.internal_count += 1;
            }
            stack.extend(node.children.values().map(|&child| (child, depth + 1)));
        }

        stats
    }

    /// Verify the structural invariants of a finished tree
    pub fn check_invariants(&self) -> Result<()> {
        let real_len = self.text.real_len();
        let mut leaves = 0usize;
        let mut seen = vec![false; real_len + 1];

        for (index, node) in self.nodes.iter().enumerate() {
            let id = index as NodeId;

            for (symbol, &child) in &node.children {
                let child_node = &self.nodes[child as usize];
                let first = self.text.symbol(child_node.start);
                if first != *symbol {
                    bail!("node {} keys child {} under the wrong symbol", id, child);
                }
            }

            if id == ROOT {
                if !node.is_root() {
                    bail!("node 0 is not marked as the root");
                }
                continue;
            }

            match node.end(self.leaf_end) {
                Some(end) if end >= node.start => {}
                Some(_) => bail!("node {} has an edge ending before it starts", id),
                None => bail!("node {} is marked as a second root", id),
            }

            if node.is_leaf() {
                leaves += 1;
                match node.suffix_start {
                    Some(start) if start <= real_len && !seen[start] => seen[start] = true,
                    Some(start) => bail!("leaf {} repeats or overruns suffix {}", id, start),
                    None => bail!("leaf {} has no suffix start", id),
                }
            } else {
                if node.children.len() < 2 {
                    bail!("internal node {} has fewer than two children", id);
                }
                if node.link.is_none() {
                    bail!("internal node {} has no suffix link", id);
                }
            }
        }

        let expected = if real_len == 0 { 0 } else { real_len + 1 };
        if leaves != expected {
            bail!("expected {} leaves, found {}", expected, leaves);
        }

        Ok(())
    }

    /// Pre-order walk of every non-root node with its depth, children in
    /// symbol order so the listing is deterministic
    pub fn edges_in_order(&self) -> Vec<(usize, NodeId)>
    where
        T: Ord,
    {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut stack = vec![(ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            if id != ROOT {
                out.push((depth, id));
            }
            let mut children: Vec<_> = self.nodes[id as usize].children.iter().collect();
            // Reverse so the smallest symbol is popped first
            children.sort_unstable_by(|a, b| b.0.cmp(a.0));
            stack.extend(children.into_iter().map(|(_, &child)| (child, depth + 1)));
        }

        out
    }
}
