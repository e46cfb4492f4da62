//! Property tests for block discovery and decomposition.
//!
//! Properties tested:
//! - Decomposition covers exactly the input cards
//! - Decomposing a flattened decomposition reproduces it
//! - Block comparison is antisymmetric for every shape and follows card values
//! - Tractor pairs sit at consecutive values
//! - Every found pair is two copies of the same face

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::domain::blocks::{
    compare_blocks, decompose, find_blocks, flatten, total_cards, Block, Shape,
};
use crate::domain::cards_logic::rank_value;
use crate::domain::cards_types::Trump;
use crate::domain::test_gens::class_cards;
use crate::domain::test_prelude;

fn assert_ordering_follows_values(blocks: &[Block], trump: &Trump) -> Result<(), TestCaseError> {
    for a in blocks {
        let top = a.cards.iter().map(|c| rank_value(c, trump)).max();
        prop_assert_eq!(Some(a.value), top);
        for b in blocks {
            let ab = compare_blocks(a, b).unwrap();
            let ba = compare_blocks(b, a).unwrap();
            prop_assert_eq!(ab, ba.reverse());
            prop_assert_eq!(ab, a.value.cmp(&b.value));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_decompose_covers_input((trump, class, cards) in class_cards(16)) {
        let groups = decompose(&cards, &trump, class);
        prop_assert_eq!(total_cards(&groups), cards.len());

        let input: BTreeSet<_> = cards.iter().map(|c| c.id).collect();
        let output: BTreeSet<_> = flatten(&groups).iter().map(|c| c.id).collect();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn prop_decompose_is_idempotent((trump, class, cards) in class_cards(16)) {
        let once = decompose(&cards, &trump, class);
        let twice = decompose(&flatten(&once), &trump, class);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_single_comparison_is_antisymmetric((trump, class, cards) in class_cards(8)) {
        let singles = find_blocks(&cards, &trump, class, Shape::SINGLE);
        for a in &singles {
            for b in &singles {
                let ab = compare_blocks(a, b).unwrap();
                let ba = compare_blocks(b, a).unwrap();
                prop_assert_eq!(ab, ba.reverse());
            }
        }
    }

    #[test]
    fn prop_pairs_share_a_face((trump, class, cards) in class_cards(20)) {
        for pair in find_blocks(&cards, &trump, class, Shape::PAIR) {
            prop_assert_eq!(pair.cards.len(), 2);
            prop_assert!(pair.cards[0].same_face(&pair.cards[1]));
            prop_assert_ne!(pair.cards[0].id, pair.cards[1].id);
        }
    }

    #[test]
    fn prop_pair_and_tractor_comparison_is_antisymmetric((trump, class, cards) in class_cards(24)) {
        let pairs = find_blocks(&cards, &trump, class, Shape::PAIR);
        assert_ordering_follows_values(&pairs, &trump)?;
        let tractors = find_blocks(&cards, &trump, class, Shape::tractor(2));
        assert_ordering_follows_values(&tractors, &trump)?;
    }

    #[test]
    fn prop_tractor_pairs_are_consecutive((trump, class, cards) in class_cards(24)) {
        for tractor in find_blocks(&cards, &trump, class, Shape::tractor(2)) {
            let mut values: Vec<u16> = tractor.cards.iter().map(|c| rank_value(c, &trump)).collect();
            values.sort_unstable();
            values.dedup();
            prop_assert_eq!(values, vec![tractor.value - 1, tractor.value]);
        }
    }
}
