//! Room adapter: one actor task per room serializing every mutation.

pub mod actor;
pub mod registry;

pub use actor::{ConnId, Outbox, RoomHandle};
pub use registry::RoomRegistry;
