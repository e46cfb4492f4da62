//! Double-deck construction, shuffling and dealing.

use rand::Rng;

use crate::domain::cards_types::{Card, CardId};
use crate::domain::rules::{BOTTOM_SIZE, DECK_SIZE, HAND_SIZE, PLAYERS};
use crate::errors::domain::DomainError;

/// Both decks in layout order (ids 0..108).
pub fn double_deck() -> Vec<Card> {
    (0..DECK_SIZE as CardId).filter_map(Card::from_id).collect()
}

/// Unbiased Fisher-Yates shuffle driven by the caller's RNG.
pub fn shuffle_deck<R: Rng>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Result of a deal: four hands of 25 and an 8-card bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; PLAYERS],
    pub bottom: Vec<Card>,
}

/// Split a shuffled deck into contiguous hands followed by the bottom.
pub fn deal(deck: &[Card]) -> Result<Deal, DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::internal(format!(
            "deck must hold {DECK_SIZE} cards, got {}",
            deck.len()
        )));
    }

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        *hand_slot = deck[start..start + HAND_SIZE].to_vec();
    }
    let bottom = deck[PLAYERS * HAND_SIZE..].to_vec();
    debug_assert_eq!(bottom.len(), BOTTOM_SIZE);

    Ok(Deal { hands, bottom })
}

/// Shuffle a fresh double deck with `rng` and deal it.
pub fn shuffle_and_deal<R: Rng>(rng: &mut R) -> Result<Deal, DomainError> {
    let mut deck = double_deck();
    shuffle_deck(&mut deck, rng);
    deal(&deck)
}
