//! Builders for hand-crafted game states used by the domain tests.

use crate::domain::cards_types::{Rank, Trump};
use crate::domain::fixtures::CardFixtures;
use crate::domain::state::{
    CallMode, CallWindow, GameState, Phase, Seat, SeatSet, SeatState, TableSettings, TrickState,
    TrumpLock, TrumpState,
};

pub const UIDS: [&str; 4] = ["ana", "bo", "cy", "di"];

pub fn settings() -> TableSettings {
    TableSettings {
        starting_level: Rank::Two,
        auto_deal: false,
    }
}

/// Four seated, ready players in the lobby.
pub fn seated_lobby() -> GameState {
    let mut state = GameState::new("room-1", settings());
    for (seat, uid) in UIDS.iter().enumerate() {
        state.seats[seat] = SeatState {
            uid: Some((*uid).to_owned()),
            ready: true,
            online: true,
            hand: Vec::new(),
        };
    }
    state
}

/// Trick play with fixed hands. `starter` declared `trump`; `leader` leads
/// trick one.
pub fn trick_table(hands: [&[&str]; 4], trump: Trump, starter: Seat, leader: Seat) -> GameState {
    let mut state = seated_lobby();
    for (seat, tokens) in hands.iter().enumerate() {
        state.seats[seat].hand = CardFixtures::parse_hardcoded(tokens);
    }
    state.round.trump = Some(TrumpState {
        trump,
        lock: TrumpLock::Sealed,
        declared_by: Some(starter),
    });
    state.round.starter = Some(starter);
    state.resort_hands();
    state.phase = Phase::PlayTrick(TrickState::new(1, leader));
    state
}

/// Calling phase with fixed hands and an eight-card bottom.
pub fn call_table(hands: [&[&str]; 4], window: CallWindow) -> GameState {
    let mut state = seated_lobby();
    for (seat, tokens) in hands.iter().enumerate() {
        state.seats[seat].hand = CardFixtures::parse_hardcoded(tokens);
    }
    state.round.bottom = CardFixtures::parse_hardcoded(&BOTTOM);
    state.resort_hands();
    state.phase = Phase::CallTrump(window);
    state
}

/// Pointless bottom used by `call_table`.
pub const BOTTOM: [&str; 8] = ["3D", "4D", "6D", "7D", "8D", "9D", "JD", "QD"];

pub fn race() -> CallWindow {
    CallWindow {
        mode: CallMode::Race,
        turn: None,
        passes: SeatSet::empty(),
    }
}

pub fn ordered(turn: Seat) -> CallWindow {
    CallWindow {
        mode: CallMode::Ordered,
        turn: Some(turn),
        passes: SeatSet::empty(),
    }
}
