//! # Online Suffix Tree Construction (Ukkonen's Algorithm)
//!
//! This library builds the suffix tree of a fixed text in a single
//! left-to-right pass, then answers substring queries in time
//! proportional to the pattern, not the text.
//!
//! ## Core Algorithm
//!
//! 1. **One phase per symbol**: a shared leaf-end tracker extends every
//!    open leaf in O(1) total per phase
//! 2. **Active point**: a (node, edge, length) cursor carried across
//!    phases marks where the next unresolved suffix sits
//! 3. **Suffix links + skip/count descent**: relocate the cursor between
//!    consecutive suffixes in amortized O(1)
//! 4. **Annotation pass**: a depth-first walk freezes leaf edges and
//!    labels each leaf with the offset of the suffix it spells
//!
//! Result: O(n) construction for a fixed alphabet, O(m) membership.
//!
//! ## Usage Example
//!
//! ```
//! use ukkonen::{SuffixTree, TreeConfig};
//!
//! let tree = SuffixTree::build_with(b"banana$", TreeConfig::with_sentinel(b'$'))?;
//! assert!(tree.contains(b"ana")?);
//! assert!(!tree.contains(b"nab")?);
//! assert_eq!(tree.leaf_count(), 7);
//! # Ok::<(), ukkonen::SuffixTreeError>(())
//! ```
//!
//! Terminate the text with a unique sentinel symbol (conventionally `$`)
//! if every suffix should end at its own indexed leaf; without one,
//! suffixes that are prefixes of other suffixes stay implicit and carry
//! no suffix index.

#![warn(missing_docs, missing_debug_implementations)]

pub mod tree;

// Re-exports for convenience
pub use tree::{NodeId, SuffixTree, SuffixTreeError, TreeConfig, TreeStats, DEFAULT_ALPHABET_SIZE};
