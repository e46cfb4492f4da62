//! Trump declarations: the initial call, a change, and an attack.

use crate::domain::cards_logic::joker_matches_suit;
use crate::domain::cards_types::{Card, CardKind, Rank, Suit, Trump};
use crate::domain::state::{TrumpLock, TrumpState};
use crate::errors::domain::{DomainError, RuleKind};

fn require_joker(joker: &Card) -> Result<(), DomainError> {
    if joker.is_joker() {
        Ok(())
    } else {
        Err(DomainError::rule(
            RuleKind::InvalidJoker,
            format!("card {} is not a joker", joker.id),
        ))
    }
}

/// Common suit of level cards that all carry `level`.
fn level_suit(level: Rank, level_cards: &[Card]) -> Result<Suit, DomainError> {
    let mut suit = None;
    for card in level_cards {
        let CardKind::Normal { suit: s, rank } = card.kind else {
            return Err(DomainError::rule(
                RuleKind::InvalidLevel,
                format!("card {} is not a level card", card.id),
            ));
        };
        if rank != level {
            return Err(DomainError::rule(
                RuleKind::InvalidLevel,
                format!("card {} does not carry the level rank", card.id),
            ));
        }
        match suit {
            None => suit = Some(s),
            Some(prev) if prev != s => {
                return Err(DomainError::rule(
                    RuleKind::IllegalTrump,
                    "level cards must share one suit",
                ))
            }
            Some(_) => {}
        }
    }
    suit.ok_or_else(|| DomainError::rule(RuleKind::IllegalTrump, "no level cards given"))
}

fn require_colour(joker: &Card, suit: Suit) -> Result<(), DomainError> {
    if joker_matches_suit(joker, suit) {
        Ok(())
    } else {
        Err(DomainError::rule(
            RuleKind::InvalidJoker,
            "big joker calls red suits, small joker calls black suits",
        ))
    }
}

/// Validate a first declaration of trump at the caller's team `level`.
///
/// One level card leaves the trump open to contest; two lock it.
pub fn validate_call(level: Rank, joker: &Card, level_cards: &[Card]) -> Result<TrumpState, DomainError> {
    require_joker(joker)?;
    if !(1..=2).contains(&level_cards.len()) {
        return Err(DomainError::rule(
            RuleKind::IllegalTrump,
            "a call shows one or two level cards",
        ));
    }
    let suit = level_suit(level, level_cards)?;
    require_colour(joker, suit)?;

    let lock = if level_cards.len() == 2 {
        TrumpLock::Sealed
    } else {
        TrumpLock::Open
    };
    Ok(TrumpState {
        trump: Trump::with_suit(level, suit),
        lock,
        declared_by: None,
    })
}

/// Validate a change: a same-suit pair of level cards plus a matching joker.
/// Any suit may be named, the current one included.
pub fn validate_change(
    current: &TrumpState,
    joker: &Card,
    level_cards: &[Card],
) -> Result<TrumpState, DomainError> {
    if current.lock != TrumpLock::Open {
        return Err(DomainError::rule(
            RuleKind::TrumpLocked,
            "trump can no longer be changed",
        ));
    }
    require_joker(joker)?;
    if level_cards.len() != 2 {
        return Err(DomainError::rule(
            RuleKind::IllegalTrump,
            "a change shows a pair of level cards",
        ));
    }
    let level = current.trump.level;
    let suit = level_suit(level, level_cards)?;
    require_colour(joker, suit)?;

    Ok(TrumpState {
        trump: Trump::with_suit(level, suit),
        lock: TrumpLock::ChangeClosed,
        declared_by: None,
    })
}

/// Validate an attack: two jokers of one kind force hard trump.
pub fn validate_attack(current: &TrumpState, jokers: &[Card]) -> Result<TrumpState, DomainError> {
    if current.lock == TrumpLock::Sealed {
        return Err(DomainError::rule(
            RuleKind::TrumpLocked,
            "trump can no longer be attacked",
        ));
    }
    for joker in jokers {
        require_joker(joker)?;
    }
    let [a, b] = jokers else {
        return Err(DomainError::rule(
            RuleKind::IllegalTrump,
            "an attack shows exactly two jokers",
        ));
    };
    if !a.same_face(b) {
        return Err(DomainError::rule(
            RuleKind::IllegalTrump,
            "attack jokers must be of one kind",
        ));
    }

    Ok(TrumpState {
        trump: Trump::hard(current.trump.level),
        lock: TrumpLock::Sealed,
        declared_by: None,
    })
}
