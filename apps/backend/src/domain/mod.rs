//! Domain layer: pure game logic types and helpers.

pub mod actions;
pub mod blocks;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod follow;
pub mod reducer;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod throw;
pub mod tricks;
pub mod trump;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_follow;
#[cfg(test)]
mod tests_props_blocks;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use actions::Action;
pub use cards_types::{Card, CardId, Rank, Suit, SuitClass, Trump};
pub use reducer::{reduce, reduce_with_rng, set_presence, Notice, Reduced};
pub use snapshot::{snapshot_for, RoomSnapshot};
pub use state::{GameState, Phase, Seat, TableSettings};
