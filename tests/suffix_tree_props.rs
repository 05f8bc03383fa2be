use proptest::prelude::*;
use ukkonen::{SuffixTree, TreeConfig};

const SENTINEL: u8 = b'$';

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    // Small alphabet maximizes suffix overlap, which is where the active
    // point and suffix-link machinery actually gets exercised.
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')], 0..48)
}

fn terminated(mut text: Vec<u8>) -> Vec<u8> {
    text.push(SENTINEL);
    text
}

proptest! {
    #[test]
    fn one_leaf_per_suffix_with_indices_forming_a_permutation(text in text_strategy()) {
        let text = terminated(text);
        let tree = SuffixTree::build_with(&text, TreeConfig::with_sentinel(SENTINEL))
            .expect("build succeeds");

        prop_assert_eq!(tree.leaf_count(), text.len());

        let mut indices = tree.suffix_indices();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..text.len()).collect::<Vec<_>>());
    }

    #[test]
    fn every_substring_matches_and_leaves_spell_true_suffixes(text in text_strategy()) {
        let text = terminated(text);
        let tree = SuffixTree::build_with(&text, TreeConfig::with_sentinel(SENTINEL))
            .expect("build succeeds");

        for start in 0..text.len() {
            for end in start + 1..=text.len() {
                prop_assert!(tree.contains(&text[start..end]).unwrap());
            }
        }

        for (index, label) in tree.leaf_suffixes() {
            prop_assert_eq!(label.as_slice(), &text[index..]);
        }
    }

    #[test]
    fn absent_patterns_are_rejected(
        text in text_strategy(),
        pattern in proptest::collection::vec(
            prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(b'd')], 1..12),
    ) {
        let text = terminated(text);
        let tree = SuffixTree::build_with(&text, TreeConfig::with_sentinel(SENTINEL))
            .expect("build succeeds");

        let occurs = text.windows(pattern.len()).any(|window| window == pattern.as_slice());
        prop_assert_eq!(tree.contains(&pattern).unwrap(), occurs);
    }

    #[test]
    fn repeated_queries_are_idempotent(text in text_strategy()) {
        let text = terminated(text);
        let tree = SuffixTree::build_with(&text, TreeConfig::with_sentinel(SENTINEL))
            .expect("build succeeds");

        let nodes = tree.node_count();
        let first = tree.contains(b"ab").unwrap();
        for _ in 0..4 {
            prop_assert_eq!(tree.contains(b"ab").unwrap(), first);
        }
        prop_assert_eq!(tree.node_count(), nodes);
    }
}
