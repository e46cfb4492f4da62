//! Error codes surfaced to clients of the rules engine.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and are grouped by category
//! prefix: `PROTO_` (malformed input), `RULE_` (illegal under the card
//! rules), `STATE_` (wrong moment or wrong actor), `SYS_` (engine fault).

use core::fmt;

/// Centralized error codes for the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Protocol
    /// Frame is not valid JSON
    ProtoBadJson,
    /// Unknown event type
    ProtoUnknownEvent,
    /// Payload has the wrong shape
    ProtoInvalidPayload,
    /// Card ids repeat within one action
    ProtoDuplicateIds,
    /// Action carries no cards
    ProtoEmptyCards,
    /// Wrong number of cards for the action
    ProtoCardCount,
    /// Card id outside the deck
    ProtoCardOutOfRange,
    /// Seat index outside 0..=3
    ProtoSeatOutOfRange,

    // Rules
    /// Lead is not a legal pattern
    RuleIllegalPlay,
    /// Follow breaks the follow-suit rules
    RuleIllegalFollow,
    /// Trump call, change or attack is not valid
    RuleIllegalTrump,
    /// Level card does not match the required level rank
    RuleInvalidLevel,
    /// Joker does not match the declared suit colour
    RuleInvalidJoker,
    /// Trump is locked against this contest
    RuleTrumpLocked,
    /// Card is not in the actor's hand
    RuleCardNotInHand,

    // State
    /// Actor is not the seat expected to act
    StateNotYourTurn,
    /// Action is not accepted in the current phase
    StateWrongPhase,
    /// Actor holds no seat
    StateNotSeated,
    /// Seat already occupied
    StateSeatTaken,
    /// Not every seat is ready
    StateNotReady,
    /// Seat already passed in this window
    StateAlreadyPassed,
    /// Actor may not take this action in this role
    StateNotEntitled,
    /// Room refuses further actions after an engine fault
    StateRoomHalted,

    // System
    /// Engine invariant violated
    SysInternalError,
    /// Configuration could not be loaded
    SysConfigError,
}

impl ErrorCode {
    /// Get the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProtoBadJson => "PROTO_BAD_JSON",
            Self::ProtoUnknownEvent => "PROTO_UNKNOWN_EVENT",
            Self::ProtoInvalidPayload => "PROTO_INVALID_PAYLOAD",
            Self::ProtoDuplicateIds => "PROTO_DUPLICATE_IDS",
            Self::ProtoEmptyCards => "PROTO_EMPTY_CARDS",
            Self::ProtoCardCount => "PROTO_CARD_COUNT",
            Self::ProtoCardOutOfRange => "PROTO_CARD_OUT_OF_RANGE",
            Self::ProtoSeatOutOfRange => "PROTO_SEAT_OUT_OF_RANGE",

            Self::RuleIllegalPlay => "RULE_ILLEGAL_PLAY",
            Self::RuleIllegalFollow => "RULE_ILLEGAL_FOLLOW",
            Self::RuleIllegalTrump => "RULE_ILLEGAL_TRUMP",
            Self::RuleInvalidLevel => "RULE_INVALID_LEVEL",
            Self::RuleInvalidJoker => "RULE_INVALID_JOKER",
            Self::RuleTrumpLocked => "RULE_TRUMP_LOCKED",
            Self::RuleCardNotInHand => "RULE_CARD_NOT_IN_HAND",

            Self::StateNotYourTurn => "STATE_NOT_YOUR_TURN",
            Self::StateWrongPhase => "STATE_WRONG_PHASE",
            Self::StateNotSeated => "STATE_NOT_SEATED",
            Self::StateSeatTaken => "STATE_SEAT_TAKEN",
            Self::StateNotReady => "STATE_NOT_READY",
            Self::StateAlreadyPassed => "STATE_ALREADY_PASSED",
            Self::StateNotEntitled => "STATE_NOT_ENTITLED",
            Self::StateRoomHalted => "STATE_ROOM_HALTED",

            Self::SysInternalError => "SYS_INTERNAL_ERROR",
            Self::SysConfigError => "SYS_CONFIG_ERROR",
        }
    }

    /// Human-readable message used when no more specific text is available.
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ProtoBadJson => "Malformed JSON",
            Self::ProtoUnknownEvent => "Unknown event",
            Self::ProtoInvalidPayload => "Invalid payload",
            Self::ProtoDuplicateIds => "Duplicate card ids",
            Self::ProtoEmptyCards => "No cards given",
            Self::ProtoCardCount => "Wrong number of cards",
            Self::ProtoCardOutOfRange => "Card id out of range",
            Self::ProtoSeatOutOfRange => "Seat out of range",

            Self::RuleIllegalPlay => "Illegal play",
            Self::RuleIllegalFollow => "Illegal follow",
            Self::RuleIllegalTrump => "Illegal trump declaration",
            Self::RuleInvalidLevel => "Level card does not match the level rank",
            Self::RuleInvalidJoker => "Joker does not match the suit colour",
            Self::RuleTrumpLocked => "Trump is locked",
            Self::RuleCardNotInHand => "Card not in hand",

            Self::StateNotYourTurn => "Not your turn",
            Self::StateWrongPhase => "Action not allowed in this phase",
            Self::StateNotSeated => "Not seated",
            Self::StateSeatTaken => "Seat taken",
            Self::StateNotReady => "Players not ready",
            Self::StateAlreadyPassed => "Already passed",
            Self::StateNotEntitled => "Not allowed for this seat",
            Self::StateRoomHalted => "Room halted",

            Self::SysInternalError => "Internal error",
            Self::SysConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
