//! Serialization and deserialization for card types

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardKind, Rank, Suit, SuitClass, Trump};

fn suit_token(suit: Suit) -> &'static str {
    match suit {
        Suit::Spades => "S",
        Suit::Hearts => "H",
        Suit::Clubs => "C",
        Suit::Diamonds => "D",
    }
}

fn rank_token(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

// Suit serde
impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(suit_token(*self))
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid suit: {s}")))
    }
}

// Rank serde
impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(rank_token(*self))
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid rank: {s}")))
    }
}

// SuitClass serde: "TRUMP" or the suit token
impl Serialize for SuitClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SuitClass::Trump => serializer.serialize_str("TRUMP"),
            SuitClass::Plain(suit) => serializer.serialize_str(suit_token(*suit)),
        }
    }
}

// Card serde: {"id": 12, "suit": "S", "rank": "2"} or {"id": 53, "rank": "BJ"}
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Card", 3)?;
        st.serialize_field("id", &self.id)?;
        match self.kind {
            CardKind::Normal { suit, rank } => {
                st.serialize_field("suit", suit_token(suit))?;
                st.serialize_field("rank", rank_token(rank))?;
            }
            CardKind::SmallJoker => {
                st.skip_field("suit")?;
                st.serialize_field("rank", "SJ")?;
            }
            CardKind::BigJoker => {
                st.skip_field("suit")?;
                st.serialize_field("rank", "BJ")?;
            }
        }
        st.end()
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            id: u8,
        }
        let wire = Wire::deserialize(deserializer)?;
        Card::from_id(wire.id)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid card id: {}", wire.id)))
    }
}

// Trump serde: {"suit": "H" | null, "level": "2"}
impl Serialize for Trump {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Trump", 2)?;
        st.serialize_field("suit", &self.suit)?;
        st.serialize_field("level", &self.level)?;
        st.end()
    }
}
