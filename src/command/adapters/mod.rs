//! Adapter implementations for the slash-command ports.
//!
//! - [`memory`]: in-memory registry and static room access gate
//! - [`query`]: JSON-value sorting, paging, and projection
//! - [`builtin`]: built-in decoration commands
//! - [`http`]: axum routes exposing the request layer

pub mod builtin;
pub mod http;
pub mod memory;
pub mod query;
