#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod protocol;
pub mod room;

// Re-exports for public API
pub use config::rules::RulesConfig;
pub use domain::{reduce, snapshot_for, Action, GameState, Notice, Reduced, RoomSnapshot};
pub use errors::domain::DomainError;
pub use errors::error_code::ErrorCode;
pub use protocol::{parse_client_frame, ServerMsg};
pub use room::{RoomHandle, RoomRegistry};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
