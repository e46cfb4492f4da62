use std::cmp::Reverse;

use crate::domain::cards_types::{Card, CardKind, Rank, Suit, SuitClass, Trump};

/// Returns true if the card belongs to the trump group under `trump`.
pub fn is_trump(card: &Card, trump: &Trump) -> bool {
    match card.kind {
        CardKind::SmallJoker | CardKind::BigJoker => true,
        CardKind::Normal { suit, rank } => rank == trump.level || Some(suit) == trump.suit,
    }
}

/// Following group of a card: trump, or its natural suit.
pub fn suit_class(card: &Card, trump: &Trump) -> SuitClass {
    match card.kind {
        CardKind::Normal { suit, .. } if !is_trump(card, trump) => SuitClass::Plain(suit),
        _ => SuitClass::Trump,
    }
}

/// Comparable strength of a card under `trump`.
///
/// Plain cards use the 2..=14 ordinal. Trump cards sit strictly above every
/// plain card in separated tiers, so no two tiers are adjacent and pairs from
/// different tiers never chain into a tractor:
/// trump-suit cards `20 + ordinal` (22..=34), off-suit level cards 40,
/// level card of the trump suit 42, every level card under hard trump 41,
/// small joker 50, big joker 60.
pub fn rank_value(card: &Card, trump: &Trump) -> u16 {
    match card.kind {
        CardKind::BigJoker => 60,
        CardKind::SmallJoker => 50,
        CardKind::Normal { suit, rank } if rank == trump.level => match trump.suit {
            None => 41,
            Some(ts) if ts == suit => 42,
            Some(_) => 40,
        },
        CardKind::Normal { suit, rank } if Some(suit) == trump.suit => 20 + rank.ordinal(),
        CardKind::Normal { rank, .. } => rank.ordinal(),
    }
}

fn display_key(card: &Card, trump: &Trump) -> (u8, u8, u16) {
    match card.kind {
        CardKind::BigJoker => (5, 0, 0),
        CardKind::SmallJoker => (4, 0, 0),
        CardKind::Normal { suit, rank } if rank == trump.level => {
            if Some(suit) == trump.suit {
                (3, 0, 0)
            } else {
                (2, suit.display_order(), 0)
            }
        }
        CardKind::Normal { suit, rank } if Some(suit) == trump.suit => (1, 0, rank.ordinal()),
        CardKind::Normal { suit, rank } => (0, suit.display_order(), rank.ordinal()),
    }
}

/// Sort a hand for display: jokers, level cards, trump suit, then the
/// remaining suits (hearts, spades, diamonds, clubs), strongest first.
/// Card id breaks ties so the order is total.
pub fn sort_hand(hand: &mut [Card], trump: &Trump) {
    hand.sort_by_key(|c| Reverse((display_key(c, trump), c.id)));
}

/// Point value carried by a card: five 5, ten 10, king 10.
pub fn card_points(card: &Card) -> u32 {
    match card.rank() {
        Some(Rank::Five) => 5,
        Some(Rank::Ten) | Some(Rank::King) => 10,
        _ => 0,
    }
}

pub fn total_points<'a>(cards: impl IntoIterator<Item = &'a Card>) -> u32 {
    cards.into_iter().map(card_points).sum()
}

/// Cards of `hand` that belong to `class`, in hand order.
pub fn cards_in_class(hand: &[Card], trump: &Trump, class: SuitClass) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|c| suit_class(c, trump) == class)
        .collect()
}

/// The single suit-class shared by all `cards`, if there is one.
pub fn common_class(cards: &[Card], trump: &Trump) -> Option<SuitClass> {
    let first = suit_class(cards.first()?, trump);
    cards
        .iter()
        .all(|c| suit_class(c, trump) == first)
        .then_some(first)
}

/// Returns true if the joker colour matches the suit: big joker pairs with
/// red suits, small joker with black suits.
pub fn joker_matches_suit(joker: &Card, suit: Suit) -> bool {
    match joker.kind {
        CardKind::BigJoker => suit.is_red(),
        CardKind::SmallJoker => !suit.is_red(),
        CardKind::Normal { .. } => false,
    }
}
