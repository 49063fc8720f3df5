//! Port trait definitions for the slash-command subsystem.
//!
//! Ports define what the request layer needs from the outside world: the
//! command registry, the room access gate, and list query processing.

pub mod access;
pub mod query;
pub mod registry;

pub use access::{RoomAccessError, RoomAccessGate, RoomAccessResult};
pub use query::{FieldProjection, QueryOptions, ResultQueryProcessor, SortDirection, SortSpec};
pub use registry::{CommandRegistry, RegistryError, RegistryResult};
