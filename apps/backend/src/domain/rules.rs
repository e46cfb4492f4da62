//! Fixed table constants for the four-player double-deck game.

pub const PLAYERS: usize = 4;
/// Two 54-card decks.
pub const DECK_SIZE: usize = 108;
/// Cards per single deck; also the id offset between a card and its twin.
pub const SINGLE_DECK: u8 = 54;
pub const HAND_SIZE: usize = 25;
pub const BOTTOM_SIZE: usize = 8;

/// Passes needed in the call window before hard trump is forced.
pub const CALL_PASSES_FOR_HARD_TRUMP: u32 = 4;
/// Passes needed from the non-owner seats to close the fight window.
pub const FIGHT_PASSES_TO_PLAY: u32 = 3;

/// Attacker points at which the declaring side loses the round.
pub const FLIP_THRESHOLD: u32 = 80;
