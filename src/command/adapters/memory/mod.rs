//! In-memory adapters.

mod access;
mod registry;

pub use access::{RoomPolicy, StaticRoomAccessGate};
pub use registry::InMemoryCommandRegistry;
