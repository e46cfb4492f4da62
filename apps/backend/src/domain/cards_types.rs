//! Core card-related types: Card, Rank, Suit, SuitClass, Trump

use crate::domain::rules::{DECK_SIZE, SINGLE_DECK};

/// Identifier of a physical card within the 108-card deck.
pub type CardId = u8;

/// Suits in deck layout order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Display precedence when sorting hands: hearts, spades, diamonds, clubs.
    pub fn display_order(self) -> u8 {
        match self {
            Suit::Hearts => 4,
            Suit::Spades => 3,
            Suit::Diamonds => 2,
            Suit::Clubs => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Ranks in deck layout order (ace first).
    pub const DESCENDING: [Rank; 13] = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ];

    /// Natural ordinal: two is 2, ace is 14.
    pub fn ordinal(self) -> u16 {
        self as u16 + 2
    }

    /// Advance by `steps` levels, saturating at ace.
    pub fn advance(self, steps: u8) -> Rank {
        let idx = (self as usize + steps as usize).min(Rank::Ace as usize);
        Rank::DESCENDING[12 - idx]
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardKind {
    Normal { suit: Suit, rank: Rank },
    SmallJoker,
    BigJoker,
}

/// One physical card. Two cards share a face; their ids differ by 54.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    /// Rebuild a card from its deck id (deck-major layout: spades, hearts,
    /// clubs, diamonds, each ace down to two, then small and big joker).
    pub fn from_id(id: CardId) -> Option<Card> {
        if id as usize >= DECK_SIZE {
            return None;
        }
        let offset = id % SINGLE_DECK;
        let kind = match offset {
            52 => CardKind::SmallJoker,
            53 => CardKind::BigJoker,
            _ => CardKind::Normal {
                suit: Suit::ALL[(offset / 13) as usize],
                rank: Rank::DESCENDING[(offset % 13) as usize],
            },
        };
        Some(Card { id, kind })
    }

    /// Id of the normal card `suit`/`rank` in deck `copy` (0 or 1).
    pub fn normal_id(suit: Suit, rank: Rank, copy: u8) -> CardId {
        copy * SINGLE_DECK + suit as u8 * 13 + (Rank::Ace as u8 - rank as u8)
    }

    pub fn small_joker_id(copy: u8) -> CardId {
        copy * SINGLE_DECK + 52
    }

    pub fn big_joker_id(copy: u8) -> CardId {
        copy * SINGLE_DECK + 53
    }

    pub fn suit(&self) -> Option<Suit> {
        match self.kind {
            CardKind::Normal { suit, .. } => Some(suit),
            _ => None,
        }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self.kind {
            CardKind::Normal { rank, .. } => Some(rank),
            _ => None,
        }
    }

    pub fn is_joker(&self) -> bool {
        !matches!(self.kind, CardKind::Normal { .. })
    }

    /// Id of the identical card from the other deck.
    pub fn twin_id(&self) -> CardId {
        if self.id < SINGLE_DECK {
            self.id + SINGLE_DECK
        } else {
            self.id - SINGLE_DECK
        }
    }

    pub fn same_face(&self, other: &Card) -> bool {
        self.kind == other.kind
    }
}

/// Which following group a card belongs to under the active trump.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SuitClass {
    Trump,
    Plain(Suit),
}

/// Active trump: level rank plus optional suit. No suit means hard trump
/// (only jokers and level cards are trump).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Trump {
    pub suit: Option<Suit>,
    pub level: Rank,
}

impl Trump {
    pub fn hard(level: Rank) -> Self {
        Self { suit: None, level }
    }

    pub fn with_suit(level: Rank, suit: Suit) -> Self {
        Self {
            suit: Some(suit),
            level,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.suit.is_none()
    }
}
