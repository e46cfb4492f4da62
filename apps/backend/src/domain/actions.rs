//! Inbound actions and their structural validation.
//!
//! Structural checks (cardinality, duplicate ids, id and seat ranges) run
//! before any phase dispatch and report protocol errors.

use std::collections::HashSet;

use crate::domain::cards_types::CardId;
use crate::domain::rules::{BOTTOM_SIZE, DECK_SIZE, PLAYERS};
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ProtocolKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Sit { seat: Seat },
    LeaveSeat,
    Ready,
    Unready,
    Start,
    CallTrump { joker: CardId, level_cards: Vec<CardId> },
    CallPass,
    PutBottom { discard: Vec<CardId> },
    ChangeTrump { joker: CardId, level_cards: Vec<CardId> },
    AttackTrump { jokers: Vec<CardId> },
    PlayCards { cards: Vec<CardId> },
    StartNextRound,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Sit { .. } => "sit",
            Action::LeaveSeat => "leave_seat",
            Action::Ready => "ready",
            Action::Unready => "unready",
            Action::Start => "start",
            Action::CallTrump { .. } => "call_trump",
            Action::CallPass => "call_pass",
            Action::PutBottom { .. } => "put_bottom",
            Action::ChangeTrump { .. } => "change_trump",
            Action::AttackTrump { .. } => "attack_trump",
            Action::PlayCards { .. } => "play_cards",
            Action::StartNextRound => "next_round",
        }
    }

    /// Reject malformed actions before they reach the phase machine.
    pub fn validate_structure(&self) -> Result<(), DomainError> {
        match self {
            Action::Sit { seat } => {
                if *seat as usize >= PLAYERS {
                    return Err(DomainError::protocol(
                        ProtocolKind::SeatOutOfRange,
                        format!("seat {seat} is outside 0..{PLAYERS}"),
                    ));
                }
                Ok(())
            }
            Action::CallTrump { joker, level_cards } => {
                require_count(level_cards, 1..=2, "level cards")?;
                require_ids(&with_joker(*joker, level_cards))
            }
            Action::ChangeTrump { joker, level_cards } => {
                require_count(level_cards, 2..=2, "level cards")?;
                require_ids(&with_joker(*joker, level_cards))
            }
            Action::AttackTrump { jokers } => {
                require_count(jokers, 2..=2, "jokers")?;
                require_ids(jokers)
            }
            Action::PutBottom { discard } => {
                require_count(discard, BOTTOM_SIZE..=BOTTOM_SIZE, "bottom cards")?;
                require_ids(discard)
            }
            Action::PlayCards { cards } => require_ids(cards),
            Action::LeaveSeat
            | Action::Ready
            | Action::Unready
            | Action::Start
            | Action::CallPass
            | Action::StartNextRound => Ok(()),
        }
    }
}

fn with_joker(joker: CardId, rest: &[CardId]) -> Vec<CardId> {
    let mut ids = Vec::with_capacity(rest.len() + 1);
    ids.push(joker);
    ids.extend_from_slice(rest);
    ids
}

fn require_count(
    ids: &[CardId],
    range: std::ops::RangeInclusive<usize>,
    what: &str,
) -> Result<(), DomainError> {
    if ids.is_empty() {
        return Err(DomainError::protocol(
            ProtocolKind::EmptyCards,
            format!("no {what} given"),
        ));
    }
    if !range.contains(&ids.len()) {
        return Err(DomainError::protocol(
            ProtocolKind::CardCount,
            format!(
                "expected {}..={} {what}, got {}",
                range.start(),
                range.end(),
                ids.len()
            ),
        ));
    }
    Ok(())
}

fn require_ids(ids: &[CardId]) -> Result<(), DomainError> {
    if ids.is_empty() {
        return Err(DomainError::protocol(ProtocolKind::EmptyCards, "no cards given"));
    }
    if let Some(bad) = ids.iter().find(|id| **id as usize >= DECK_SIZE) {
        return Err(DomainError::protocol(
            ProtocolKind::CardOutOfRange,
            format!("card id {bad} is outside the deck"),
        ));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(DomainError::protocol(
            ProtocolKind::DuplicateIds,
            format!("card id {dup} repeats"),
        ));
    }
    Ok(())
}
