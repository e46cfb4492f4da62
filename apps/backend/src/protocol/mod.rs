//! JSON wire frames between clients and a room.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::actions::Action;
use crate::domain::cards_types::CardId;
use crate::domain::reducer::Notice;
use crate::domain::snapshot::RoomSnapshot;
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ProtocolKind};

/// Raw client frame: `{"type": "...", "payload": {...}}`.
#[derive(Debug, Deserialize)]
struct ClientFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SitPayload {
    seat: Seat,
}

#[derive(Debug, Deserialize)]
struct DeclarePayload {
    joker: CardId,
    level_cards: Vec<CardId>,
}

#[derive(Debug, Deserialize)]
struct JokersPayload {
    jokers: Vec<CardId>,
}

#[derive(Debug, Deserialize)]
struct CardsPayload {
    cards: Vec<CardId>,
}

fn payload<T: DeserializeOwned>(kind: &str, value: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::protocol(ProtocolKind::InvalidPayload, format!("{kind}: {e}"))
    })
}

/// Parse a client text frame into an engine action.
pub fn parse_client_frame(raw: &str) -> Result<Action, DomainError> {
    let frame: ClientFrame = serde_json::from_str(raw)
        .map_err(|e| DomainError::protocol(ProtocolKind::BadJson, e.to_string()))?;
    let kind = frame.kind.as_str();

    let action = match kind {
        "room.sit" => {
            let p: SitPayload = payload(kind, frame.payload)?;
            Action::Sit { seat: p.seat }
        }
        "room.leave_seat" => Action::LeaveSeat,
        "room.ready" => Action::Ready,
        "room.unready" => Action::Unready,
        "game.start" => Action::Start,
        "game.call_trump" => {
            let p: DeclarePayload = payload(kind, frame.payload)?;
            Action::CallTrump {
                joker: p.joker,
                level_cards: p.level_cards,
            }
        }
        "game.call_pass" => Action::CallPass,
        "game.put_bottom" => {
            let p: CardsPayload = payload(kind, frame.payload)?;
            Action::PutBottom { discard: p.cards }
        }
        "game.change_trump" => {
            let p: DeclarePayload = payload(kind, frame.payload)?;
            Action::ChangeTrump {
                joker: p.joker,
                level_cards: p.level_cards,
            }
        }
        "game.attack_trump" => {
            let p: JokersPayload = payload(kind, frame.payload)?;
            Action::AttackTrump { jokers: p.jokers }
        }
        "game.play_cards" => {
            let p: CardsPayload = payload(kind, frame.payload)?;
            Action::PlayCards { cards: p.cards }
        }
        "game.next_round" => Action::StartNextRound,
        other => {
            return Err(DomainError::protocol(
                ProtocolKind::UnknownEvent,
                format!("unknown event type '{other}'"),
            ))
        }
    };
    Ok(action)
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Hello {
        conn_id: u64,
        room_id: String,
        uid: String,
        seat: Option<Seat>,
    },

    Snapshot {
        snapshot: RoomSnapshot,
    },

    Error {
        code: &'static str,
        message: &'static str,
        detail: String,
    },

    Notice {
        notice: Notice,
    },
}

impl ServerMsg {
    pub fn error(err: &DomainError) -> Self {
        ServerMsg::Error {
            code: err.code().as_str(),
            message: err.message(),
            detail: err.detail().to_owned(),
        }
    }
}
