//! Shared helpers for the room server's integration tests.

pub mod logging;
