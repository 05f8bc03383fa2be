//! Post-construction annotation and read-only descent
//!
//! Both walks are iterative with an explicit stack of arena indices: the
//! tree can be as deep as the text is long, so recursion is off the table
//! for large inputs.

use super::node::{EdgeEnd, NodeArena, NodeId};

/// Outcome of matching a pattern slice against one edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeMatch {
    /// Pattern exhausted on (or at the end of) this edge.
    Match,
    /// A symbol disagreed.
    NoMatch,
    /// Edge exhausted first; continue below.
    Partial,
}

/// Freeze every leaf's open end and assign suffix indices.
///
/// Depth-first from the root, accumulating the root-to-node label height.
/// A leaf's open end is fixed to the final leaf end, trimmed back to the
/// first `sentinel` occurrence on its edge when one is configured, and its
/// suffix index becomes `text_len - label_height`. Heights are taken
/// before trimming, matching the lengths the edges had during
/// construction.
pub(crate) fn annotate(
    arena: &mut NodeArena,
    text: &[u8],
    leaf_end: usize,
    sentinel: Option<u8>,
) {
    let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];

    while let Some((id, label_height)) = stack.pop() {
        if !id.is_root() && arena.node(id).is_leaf() {
            let edge_start = arena.node(id).edge_start;
            let mut end = arena.node(id).edge_end.resolve(leaf_end);

            if let Some(sentinel) = sentinel {
                for k in edge_start..=end {
                    if text[k] == sentinel {
                        end = k;
                        break;
                    }
                }
            }

            let node = arena.node_mut(id);
            node.edge_end = EdgeEnd::Fixed(end);
            node.suffix_index = Some(text.len() - label_height);
            continue;
        }

        let children: Vec<NodeId> = arena.children_of(id).map(|(_, child)| child).collect();
        for child in children {
            let height = label_height + arena.edge_length(child, leaf_end);
            stack.push((child, height));
        }
    }
}

/// Match `pattern[offset..]` against `text[edge_start..=edge_end]`.
fn traverse_edge(
    text: &[u8],
    pattern: &[u8],
    mut offset: usize,
    edge_start: usize,
    edge_end: usize,
) -> EdgeMatch {
    let mut k = edge_start;
    while k <= edge_end && offset < pattern.len() {
        if text[k] != pattern[offset] {
            return EdgeMatch::NoMatch;
        }
        offset += 1;
        k += 1;
    }

    if offset >= pattern.len() {
        EdgeMatch::Match
    } else {
        EdgeMatch::Partial
    }
}

/// Substring membership: descend from the root, matching edge labels
/// symbol by symbol and hopping to the next child at edge granularity.
/// Read-only; the tree is never touched.
pub(crate) fn contains(arena: &NodeArena, text: &[u8], leaf_end: usize, pattern: &[u8]) -> bool {
    if pattern.is_empty() {
        // The empty pattern is a substring of every text.
        return true;
    }

    let mut node = NodeId::ROOT;
    let mut offset = 0;

    loop {
        if !node.is_root() {
            let edge_start = arena.node(node).edge_start;
            let edge_end = arena.node(node).edge_end.resolve(leaf_end);
            match traverse_edge(text, pattern, offset, edge_start, edge_end) {
                EdgeMatch::Match => return true,
                EdgeMatch::NoMatch => return false,
                EdgeMatch::Partial => {}
            }
            offset += arena.edge_length(node, leaf_end);
        }

        match arena.child(node, pattern[offset]) {
            Some(next) => node = next,
            None => return false,
        }
    }
}

/// Collect `(suffix_index, root-to-leaf label)` for every annotated leaf,
/// in depth-first symbol order.
pub(crate) fn leaf_suffixes(
    arena: &NodeArena,
    text: &[u8],
    leaf_end: usize,
) -> Vec<(usize, Vec<u8>)> {
    let mut out = Vec::new();
    // Reverse so lower symbols are visited first despite LIFO order.
    let mut stack: Vec<(NodeId, Vec<u8>)> = vec![(NodeId::ROOT, Vec::new())];

    while let Some((id, prefix)) = stack.pop() {
        let node = arena.node(id);
        if !id.is_root() && node.is_leaf() {
            if let Some(index) = node.suffix_index {
                out.push((index, prefix));
            }
            continue;
        }

        let children: Vec<NodeId> = arena.children_of(id).map(|(_, child)| child).collect();
        for child in children.into_iter().rev() {
            let child_node = arena.node(child);
            let end = child_node.edge_end.resolve(leaf_end);
            let mut label = prefix.clone();
            label.extend_from_slice(&text[child_node.edge_start..=end]);
            stack.push((child, label));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::TreeBuilder;

    fn build(text: &[u8]) -> (NodeArena, usize) {
        let (mut arena, leaf_end) = TreeBuilder::new(text, 256).build();
        annotate(&mut arena, text, leaf_end, Some(b'$'));
        (arena, leaf_end)
    }

    #[test]
    fn annotation_assigns_every_suffix_once() {
        let text = b"banana$";
        let (arena, leaf_end) = build(text);

        let mut indices: Vec<usize> = leaf_suffixes(&arena, text, leaf_end)
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..text.len()).collect::<Vec<_>>());
    }

    #[test]
    fn leaf_labels_spell_their_suffixes() {
        let text = b"abcabxabcd$";
        let (arena, leaf_end) = build(text);

        for (index, label) in leaf_suffixes(&arena, text, leaf_end) {
            assert_eq!(label.as_slice(), &text[index..], "leaf for suffix {index}");
        }
    }

    #[test]
    fn descent_matches_mid_edge_and_across_nodes() {
        let text = b"banana$";
        let (arena, leaf_end) = build(text);

        assert!(contains(&arena, text, leaf_end, b"ban"));
        assert!(contains(&arena, text, leaf_end, b"ana"));
        assert!(contains(&arena, text, leaf_end, b"nana$"));
        assert!(!contains(&arena, text, leaf_end, b"nax"));
        assert!(!contains(&arena, text, leaf_end, b"banana$x"));
        assert!(contains(&arena, text, leaf_end, b""));
    }

    #[test]
    fn unused_symbol_is_a_plain_mismatch() {
        let text = b"banana$";
        let (arena, leaf_end) = build(text);
        assert!(!contains(&arena, text, leaf_end, b"zzz"));
    }
}
