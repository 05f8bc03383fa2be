//! Suffix tree of a fixed text
//!
//! Built online with Ukkonen's algorithm in O(n) for a fixed alphabet,
//! then read-only: substring membership costs O(m) in the pattern length.
//!
//! Construction state (active point, pending suffix count, shared leaf
//! end) lives in [`builder::TreeBuilder`] and is dropped when the build
//! finishes; the finished tree owns its text, its node arena, and the
//! frozen leaf end.

pub(crate) mod builder;
mod node;
mod traversal;

pub use node::{NodeId, DEFAULT_ALPHABET_SIZE};

use std::io;

use thiserror::Error;
use tracing::debug;

use node::NodeArena;

/// Error type returned by suffix tree construction and queries.
#[derive(Debug, Error)]
pub enum SuffixTreeError {
    /// A symbol fell outside the configured alphabet.
    #[error("symbol {symbol:#04x} at position {position} outside alphabet of size {alphabet_size}")]
    InvalidSymbol {
        /// Offending byte.
        symbol: u8,
        /// Position within the text or pattern where it was observed.
        position: usize,
        /// Alphabet size the tree was configured with.
        alphabet_size: usize,
    },

    /// Alphabet size outside the supported `1..=256` range.
    #[error("alphabet size must be between 1 and 256, got {0}")]
    InvalidAlphabetSize(usize),
}

/// Construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of distinct symbols; every text and pattern byte must be
    /// below this. Child tables hold one slot per symbol.
    pub alphabet_size: usize,

    /// Terminator symbol for leaf-label trimming. Appending a unique
    /// sentinel to the text guarantees one distinct leaf per suffix;
    /// without it, suffixes that are prefixes of other suffixes never
    /// reach a leaf of their own and carry no suffix index.
    pub sentinel: Option<u8>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            alphabet_size: DEFAULT_ALPHABET_SIZE,
            sentinel: None,
        }
    }
}

impl TreeConfig {
    /// Byte alphabet with the given terminator symbol.
    pub fn with_sentinel(sentinel: u8) -> Self {
        Self {
            sentinel: Some(sentinel),
            ..Self::default()
        }
    }
}

/// Aggregate counts over a finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeStats {
    /// Length of the indexed text, sentinel included.
    pub text_len: usize,
    /// Total nodes, root included.
    pub node_count: usize,
    /// Leaves (one per suffix when a unique sentinel terminates the text).
    pub leaf_count: usize,
    /// Internal nodes, root excluded.
    pub internal_count: usize,
}

/// Suffix tree over a byte text.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: Vec<u8>,
    arena: NodeArena,
    /// Final value of the shared leaf end, frozen after annotation.
    leaf_end: usize,
    config: TreeConfig,
}

impl SuffixTree {
    /// Build the tree over `text` with the default byte alphabet.
    ///
    /// The caller is expected to terminate `text` with a unique sentinel
    /// symbol (conventionally `$`) if it wants every suffix to end at a
    /// distinct, indexed leaf; see [`TreeConfig::sentinel`].
    pub fn build(text: &[u8]) -> Result<Self, SuffixTreeError> {
        Self::build_with(text, TreeConfig::default())
    }

    /// Build the tree with explicit configuration.
    pub fn build_with(text: &[u8], config: TreeConfig) -> Result<Self, SuffixTreeError> {
        if config.alphabet_size == 0 || config.alphabet_size > DEFAULT_ALPHABET_SIZE {
            return Err(SuffixTreeError::InvalidAlphabetSize(config.alphabet_size));
        }
        validate_symbols(text, config.alphabet_size)?;

        let (mut arena, leaf_end) = builder::TreeBuilder::new(text, config.alphabet_size).build();
        traversal::annotate(&mut arena, text, leaf_end, config.sentinel);

        let tree = Self {
            text: text.to_vec(),
            arena,
            leaf_end,
            config,
        };
        debug!(
            text_len = tree.text.len(),
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            "suffix tree built"
        );
        Ok(tree)
    }

    /// Test whether `pattern` occurs in the indexed text.
    ///
    /// O(m) in the pattern length. A pattern symbol inside the alphabet
    /// but absent from the text resolves to `Ok(false)`; a symbol outside
    /// the alphabet is an error. The empty pattern matches every text.
    pub fn contains(&self, pattern: &[u8]) -> Result<bool, SuffixTreeError> {
        validate_symbols(pattern, self.config.alphabet_size)?;
        Ok(traversal::contains(
            &self.arena,
            &self.text,
            self.leaf_end,
            pattern,
        ))
    }

    /// The indexed text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Root of the tree.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Children of `id` as `(first symbol, child)` pairs in symbol order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.arena.children_of(id)
    }

    /// Label of the edge entering `id`; empty for the root.
    pub fn edge_label(&self, id: NodeId) -> &[u8] {
        if id.is_root() {
            return &[];
        }
        let node = self.arena.node(id);
        let end = node.edge_end.resolve(self.leaf_end);
        &self.text[node.edge_start..=end]
    }

    /// Starting offset of the suffix ending at leaf `id`, if annotated.
    pub fn suffix_index(&self, id: NodeId) -> Option<usize> {
        self.arena.node(id).suffix_index
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        (1..self.arena.len())
            .map(NodeId::new)
            .filter(|&id| self.arena.node(id).is_leaf())
            .count()
    }

    /// Suffix indices of all annotated leaves, in depth-first symbol order.
    pub fn suffix_indices(&self) -> Vec<usize> {
        self.leaf_suffixes().into_iter().map(|(index, _)| index).collect()
    }

    /// `(suffix_index, root-to-leaf label)` for every annotated leaf.
    pub fn leaf_suffixes(&self) -> Vec<(usize, Vec<u8>)> {
        traversal::leaf_suffixes(&self.arena, &self.text, self.leaf_end)
    }

    /// Aggregate counts.
    pub fn stats(&self) -> TreeStats {
        let leaf_count = self.leaf_count();
        TreeStats {
            text_len: self.text.len(),
            node_count: self.node_count(),
            leaf_count,
            internal_count: self.node_count() - leaf_count - 1,
        }
    }

    /// Render the tree as an indented edge-label listing, leaves tagged
    /// with their suffix index. Presentation only.
    pub fn write_dump<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        let mut stack: Vec<(NodeId, usize)> = self
            .children(self.root())
            .map(|(_, child)| (child, 0))
            .collect();
        stack.reverse();

        while let Some((id, depth)) = stack.pop() {
            let label = String::from_utf8_lossy(self.edge_label(id)).into_owned();
            match self.suffix_index(id) {
                Some(index) => writeln!(w, "{}{label} [{index}]", "  ".repeat(depth))?,
                None => writeln!(w, "{}{label}", "  ".repeat(depth))?,
            }

            let children: Vec<_> = self
                .children(id)
                .map(|(_, child)| (child, depth + 1))
                .collect();
            for entry in children.into_iter().rev() {
                stack.push(entry);
            }
        }
        Ok(())
    }
}

fn validate_symbols(symbols: &[u8], alphabet_size: usize) -> Result<(), SuffixTreeError> {
    if alphabet_size == DEFAULT_ALPHABET_SIZE {
        return Ok(());
    }
    for (position, &symbol) in symbols.iter().enumerate() {
        if symbol as usize >= alphabet_size {
            return Err(SuffixTreeError::InvalidSymbol {
                symbol,
                position,
                alphabet_size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_terminated_text_has_one_leaf_per_suffix() {
        let tree =
            SuffixTree::build_with(b"banana$", TreeConfig::with_sentinel(b'$')).unwrap();
        assert_eq!(tree.leaf_count(), 7);

        let mut indices = tree.suffix_indices();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_text_is_a_bare_root() {
        let tree = SuffixTree::build(b"").unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.leaf_count(), 0);
        assert!(!tree.contains(b"a").unwrap());
        assert!(tree.contains(b"").unwrap());
    }

    #[test]
    fn narrow_alphabet_rejects_out_of_range_symbols() {
        let config = TreeConfig {
            alphabet_size: 4,
            sentinel: Some(3),
        };
        let err = SuffixTree::build_with(&[0, 1, 2, 200, 3], config).unwrap_err();
        match err {
            SuffixTreeError::InvalidSymbol {
                symbol, position, ..
            } => {
                assert_eq!(symbol, 200);
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let tree = SuffixTree::build_with(&[0, 1, 0, 1, 3], config).unwrap();
        assert!(tree.contains(&[1, 0, 1]).unwrap());
        assert!(tree.contains(&[200]).is_err());
    }

    #[test]
    fn zero_and_oversized_alphabets_are_rejected() {
        for alphabet_size in [0, 257, 1024] {
            let config = TreeConfig {
                alphabet_size,
                sentinel: None,
            };
            assert!(matches!(
                SuffixTree::build_with(b"a", config),
                Err(SuffixTreeError::InvalidAlphabetSize(_))
            ));
        }
    }

    #[test]
    fn dump_lists_every_leaf_with_its_index() {
        let tree = SuffixTree::build_with(b"aa$", TreeConfig::with_sentinel(b'$')).unwrap();
        let mut rendered = Vec::new();
        tree.write_dump(&mut rendered).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();

        for index in 0..3 {
            assert!(
                rendered.contains(&format!("[{index}]")),
                "missing leaf {index} in:\n{rendered}"
            );
        }
    }

    #[test]
    fn stats_are_consistent() {
        let tree =
            SuffixTree::build_with(b"abcabxabcd$", TreeConfig::with_sentinel(b'$')).unwrap();
        let stats = tree.stats();
        assert_eq!(stats.text_len, 11);
        assert_eq!(stats.leaf_count, 11);
        assert_eq!(
            stats.node_count,
            stats.leaf_count + stats.internal_count + 1
        );
    }
}
