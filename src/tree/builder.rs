//! Online construction engine (Ukkonen's algorithm)
//!
//! One phase per text symbol. A phase first advances the shared leaf end,
//! which extends every open leaf in O(1) total (extension rule 1), then
//! resolves pending suffixes from the active point:
//!
//! - rule 2a: no outgoing edge for the next symbol → new leaf edge
//! - rule 2b: mismatch mid-edge → split the edge, new internal node + leaf
//! - rule 3: symbol already on the edge → the remaining suffixes of this
//!   phase are implicitly present; stop the phase
//!
//! Suffix links let the active point jump from the locus of one suffix to
//! the locus of the next in amortized O(1); together with the skip/count
//! descent in [`TreeBuilder::walk_down`] this bounds the whole build to
//! O(n) for a fixed alphabet.

use tracing::trace;

use super::node::{EdgeEnd, NodeArena, NodeId};

/// Per-build construction state: the arena being grown, the active point,
/// and the shared leaf end. Dropped once the tree is finished, so none of
/// the bookkeeping survives into the queryable structure.
#[derive(Debug)]
pub(crate) struct TreeBuilder<'t> {
    text: &'t [u8],
    arena: NodeArena,

    /// Shared right endpoint of every open leaf edge; written once per phase.
    leaf_end: usize,

    /// Active point: where the next unresolved suffix sits in the tree.
    active_node: NodeId,
    active_edge: usize,
    active_length: usize,

    /// Suffixes of the current prefix not yet explicitly represented.
    remaining: usize,
}

impl<'t> TreeBuilder<'t> {
    pub fn new(text: &'t [u8], alphabet_size: usize) -> Self {
        Self {
            text,
            arena: NodeArena::with_alphabet(alphabet_size),
            leaf_end: 0,
            active_node: NodeId::ROOT,
            active_edge: 0,
            active_length: 0,
            remaining: 0,
        }
    }

    /// Run all phases and hand back the arena plus the final leaf end.
    pub fn build(mut self) -> (NodeArena, usize) {
        for pos in 0..self.text.len() {
            self.extend(pos);
        }
        (self.arena, self.leaf_end)
    }

    /// Skip/count descent: if the active length spans the whole candidate
    /// edge, hop the active point over it in O(1) instead of walking the
    /// edge symbol by symbol.
    fn walk_down(&mut self, next: NodeId) -> bool {
        let edge_length = self.arena.edge_length(next, self.leaf_end);
        if self.active_length >= edge_length {
            self.active_edge += edge_length;
            self.active_length -= edge_length;
            self.active_node = next;
            return true;
        }
        false
    }

    /// One phase: ensure every suffix of `text[..=pos]` is represented.
    fn extend(&mut self, pos: usize) {
        // Rule 1: every open leaf grows through the new symbol.
        self.leaf_end = pos;
        self.remaining += 1;

        // Internal node created in an earlier extension of this phase,
        // still waiting for its suffix link.
        let mut last_new_node: Option<NodeId> = None;

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }

            let edge_symbol = self.text[self.active_edge];
            match self.arena.child(self.active_node, edge_symbol) {
                None => {
                    // Rule 2a: fresh leaf edge out of the active node.
                    let leaf = self.arena.create(pos, EdgeEnd::Open);
                    self.arena.set_child(self.active_node, edge_symbol, leaf);
                    trace!(phase = pos, %leaf, "new leaf edge");

                    if let Some(pending) = last_new_node.take() {
                        self.arena.node_mut(pending).suffix_link = Some(self.active_node);
                    }
                }
                Some(next) => {
                    if self.walk_down(next) {
                        // Active point moved; retry from the new node.
                        continue;
                    }

                    let next_start = self.arena.node(next).edge_start;
                    if self.text[next_start + self.active_length] == self.text[pos] {
                        // Rule 3: suffix already implicitly present.
                        if last_new_node.is_some() && !self.active_node.is_root() {
                            if let Some(pending) = last_new_node.take() {
                                self.arena.node_mut(pending).suffix_link =
                                    Some(self.active_node);
                            }
                        }
                        self.active_length += 1;
                        // Every remaining suffix of this phase is implicit
                        // too; stopping here is what keeps the total work
                        // linear.
                        break;
                    }

                    // Rule 2b: the active point is mid-edge and the new
                    // symbol falls off the tree. Split the edge: the new
                    // internal node keeps the matched prefix, the old child
                    // is re-attached behind it, and a new leaf carries the
                    // current symbol.
                    let split_end = next_start + self.active_length - 1;
                    let split = self.arena.create(next_start, EdgeEnd::Fixed(split_end));
                    self.arena.set_child(self.active_node, edge_symbol, split);

                    let leaf = self.arena.create(pos, EdgeEnd::Open);
                    self.arena.set_child(split, self.text[pos], leaf);

                    let reparented_start = next_start + self.active_length;
                    self.arena.node_mut(next).edge_start = reparented_start;
                    self.arena.set_child(split, self.text[reparented_start], next);
                    trace!(phase = pos, %split, %leaf, "split edge");

                    if let Some(pending) = last_new_node {
                        self.arena.node_mut(pending).suffix_link = Some(split);
                    }
                    last_new_node = Some(split);
                }
            }

            // One more suffix is now explicit.
            self.remaining -= 1;

            // Re-home the active point for the next extension.
            if self.active_node.is_root() && self.active_length > 0 {
                self.active_length -= 1;
                self.active_edge = pos - self.remaining + 1;
            } else if !self.active_node.is_root() {
                let link = self.arena.node(self.active_node).suffix_link;
                self.active_node = link.unwrap_or(NodeId::ROOT);
            }
        }
    }
}
