//! Engine-level error type.
//!
//! Every rejected action yields one of four categories. Each variant carries a
//! kind (mapped to a stable [`ErrorCode`]) and a contextual detail string. The
//! value is built fresh at the failure site and never mutated afterwards.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

/// Malformed or structurally invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    BadJson,
    UnknownEvent,
    InvalidPayload,
    DuplicateIds,
    EmptyCards,
    CardCount,
    CardOutOfRange,
    SeatOutOfRange,
}

/// Input is well formed but illegal under the card rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    IllegalPlay,
    IllegalFollow,
    IllegalTrump,
    InvalidLevel,
    InvalidJoker,
    TrumpLocked,
    CardNotInHand,
}

/// Action arrives at the wrong moment or from the wrong seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    NotYourTurn,
    WrongPhase,
    NotSeated,
    SeatTaken,
    NotReady,
    AlreadyPassed,
    NotEntitled,
    RoomHalted,
}

/// Engine faults: broken invariants and bad configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    Internal,
    Config,
}

/// Central engine error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("protocol {0:?}: {1}")]
    Protocol(ProtocolKind, String),
    #[error("rule {0:?}: {1}")]
    Rule(RuleKind, String),
    #[error("state {0:?}: {1}")]
    State(StateKind, String),
    #[error("system {0:?}: {1}")]
    System(SystemKind, String),
}

impl DomainError {
    pub fn protocol(kind: ProtocolKind, detail: impl Into<String>) -> Self {
        Self::Protocol(kind, detail.into())
    }
    pub fn rule(kind: RuleKind, detail: impl Into<String>) -> Self {
        Self::Rule(kind, detail.into())
    }
    pub fn state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::State(kind, detail.into())
    }
    pub fn system(kind: SystemKind, detail: impl Into<String>) -> Self {
        Self::System(kind, detail.into())
    }

    /// Shorthand for a broken engine invariant.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::System(SystemKind::Internal, detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Protocol(kind, _) => match kind {
                ProtocolKind::BadJson => ErrorCode::ProtoBadJson,
                ProtocolKind::UnknownEvent => ErrorCode::ProtoUnknownEvent,
                ProtocolKind::InvalidPayload => ErrorCode::ProtoInvalidPayload,
                ProtocolKind::DuplicateIds => ErrorCode::ProtoDuplicateIds,
                ProtocolKind::EmptyCards => ErrorCode::ProtoEmptyCards,
                ProtocolKind::CardCount => ErrorCode::ProtoCardCount,
                ProtocolKind::CardOutOfRange => ErrorCode::ProtoCardOutOfRange,
                ProtocolKind::SeatOutOfRange => ErrorCode::ProtoSeatOutOfRange,
            },
            DomainError::Rule(kind, _) => match kind {
                RuleKind::IllegalPlay => ErrorCode::RuleIllegalPlay,
                RuleKind::IllegalFollow => ErrorCode::RuleIllegalFollow,
                RuleKind::IllegalTrump => ErrorCode::RuleIllegalTrump,
                RuleKind::InvalidLevel => ErrorCode::RuleInvalidLevel,
                RuleKind::InvalidJoker => ErrorCode::RuleInvalidJoker,
                RuleKind::TrumpLocked => ErrorCode::RuleTrumpLocked,
                RuleKind::CardNotInHand => ErrorCode::RuleCardNotInHand,
            },
            DomainError::State(kind, _) => match kind {
                StateKind::NotYourTurn => ErrorCode::StateNotYourTurn,
                StateKind::WrongPhase => ErrorCode::StateWrongPhase,
                StateKind::NotSeated => ErrorCode::StateNotSeated,
                StateKind::SeatTaken => ErrorCode::StateSeatTaken,
                StateKind::NotReady => ErrorCode::StateNotReady,
                StateKind::AlreadyPassed => ErrorCode::StateAlreadyPassed,
                StateKind::NotEntitled => ErrorCode::StateNotEntitled,
                StateKind::RoomHalted => ErrorCode::StateRoomHalted,
            },
            DomainError::System(kind, _) => match kind {
                SystemKind::Internal => ErrorCode::SysInternalError,
                SystemKind::Config => ErrorCode::SysConfigError,
            },
        }
    }

    pub fn message(&self) -> &'static str {
        self.code().default_message()
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Protocol(_, d)
            | DomainError::Rule(_, d)
            | DomainError::State(_, d)
            | DomainError::System(_, d) => d,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, DomainError::System(..))
    }
}
