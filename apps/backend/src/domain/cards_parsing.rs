//! Card parsing from compact tokens (e.g., "AS", "TH#1", "BJ").
//!
//! A token is a face followed by an optional `#<copy>` suffix picking the
//! second deck. Faces: rank `2-9 T J Q K A` (or `10`) then suit `S H C D`;
//! jokers are `SJ` and `BJ`.

use std::str::FromStr;

use super::cards_types::{Card, CardId, Rank, Suit};
use crate::errors::domain::{DomainError, ProtocolKind};

fn parse_err(s: &str) -> DomainError {
    DomainError::protocol(ProtocolKind::InvalidPayload, format!("Parse card: {s}"))
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => {
                return Err(DomainError::protocol(
                    ProtocolKind::InvalidPayload,
                    format!("Parse rank: {s}"),
                ))
            }
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Suit::Spades),
            "H" => Ok(Suit::Hearts),
            "C" => Ok(Suit::Clubs),
            "D" => Ok(Suit::Diamonds),
            _ => Err(DomainError::protocol(
                ProtocolKind::InvalidPayload,
                format!("Parse suit: {s}"),
            )),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face, copy) = match s.split_once('#') {
            Some((face, copy)) => {
                let copy: u8 = copy.parse().map_err(|_| parse_err(s))?;
                if copy > 1 {
                    return Err(parse_err(s));
                }
                (face, copy)
            }
            None => (s, 0),
        };

        let id: CardId = match face {
            "SJ" => Card::small_joker_id(copy),
            "BJ" => Card::big_joker_id(copy),
            _ => {
                if !face.is_ascii() || face.len() < 2 {
                    return Err(parse_err(s));
                }
                let (rank_part, suit_part) = face.split_at(face.len() - 1);
                let rank: Rank = rank_part.parse().map_err(|_| parse_err(s))?;
                let suit: Suit = suit_part.parse().map_err(|_| parse_err(s))?;
                Card::normal_id(suit, rank, copy)
            }
        };
        Card::from_id(id).ok_or_else(|| parse_err(s))
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
