//! Request layer for the slash-command subsystem.
//!
//! [`CommandsApi`] validates request shape, consults the registry, access
//! gate, and executor, and maps outcomes to an [`ApiResponse`]. It is
//! transport-agnostic: query strings and JSON bodies are both passed in as
//! untyped maps.

mod commands;
mod envelope;
mod pagination;
mod request;

pub use commands::CommandsApi;
pub use envelope::ApiResponse;
pub use pagination::{JsonQuery, Pagination};
