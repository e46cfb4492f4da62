// Proptest generators for domain types.
// Card sets are built from distinct deck ids so every generated hand is a
// legal subset of the double deck.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_logic::suit_class;
use crate::domain::cards_types::{Card, Rank, Suit, SuitClass, Trump};
use crate::domain::dealing::{shuffle_and_deal, Deal};
use crate::domain::rules::DECK_SIZE;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::DESCENDING.to_vec())
}

/// Hard or suited trump at any level.
pub fn trump() -> impl Strategy<Value = Trump> {
    (rank(), prop::option::of(suit())).prop_map(|(level, suit)| Trump { suit, level })
}

/// Any `count` distinct cards of the double deck.
pub fn distinct_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence((0..DECK_SIZE as u8).collect::<Vec<_>>(), count)
        .prop_shuffle()
        .prop_map(|ids| ids.into_iter().filter_map(Card::from_id).collect())
}

/// A trump plus a non-empty set of distinct cards that all share `class`
/// under it. Plain classes use the trump's off-suits; the trump class mixes
/// jokers, level cards and trump-suit cards.
pub fn class_cards(max: usize) -> impl Strategy<Value = (Trump, SuitClass, Vec<Card>)> {
    (trump(), any::<prop::sample::Index>()).prop_flat_map(move |(trump, pick)| {
        let classes: Vec<SuitClass> = std::iter::once(SuitClass::Trump)
            .chain(Suit::ALL.iter().filter(|s| trump.suit != Some(**s)).map(|s| SuitClass::Plain(*s)))
            .collect();
        let class = classes[pick.index(classes.len())];
        let pool: Vec<u8> = (0..DECK_SIZE as u8)
            .filter(|id| Card::from_id(*id).is_some_and(|c| suit_class(&c, &trump) == class))
            .collect();
        let upper = max.min(pool.len()).max(1);
        prop::sample::subsequence(pool, 1..=upper).prop_map(move |ids| {
            let cards: Vec<Card> = ids.into_iter().filter_map(Card::from_id).collect();
            (trump, class, cards)
        })
    })
}

/// A full shuffled deal from a generated seed.
pub fn seeded_deal() -> impl Strategy<Value = Deal> {
    any::<u64>().prop_map(|seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        shuffle_and_deal(&mut rng).expect("a fresh double deck always deals")
    })
}
