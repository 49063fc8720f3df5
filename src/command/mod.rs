//! Slash-command registry, execution, and request handling.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: command descriptors, handler capabilities, and invocation
//!   context ([`domain::CommandDescriptor`], [`domain::MessageContext`])
//! - **Ports**: registry, access gate, and query processing contracts
//!   ([`ports::CommandRegistry`], [`ports::RoomAccessGate`])
//! - **Adapters**: in-memory registry, static access gate, JSON query
//!   processor, built-in commands, and the HTTP transport
//! - **Services**: [`services::CommandExecutor`] dispatches invocations
//! - **API**: [`api::CommandsApi`] implements the `commands.*` operations
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::{Map, Value, json};
//! use slashgate::command::adapters::memory::{
//!     InMemoryCommandRegistry, RoomPolicy, StaticRoomAccessGate,
//! };
//! use slashgate::command::adapters::query::JsonResultProcessor;
//! use slashgate::command::api::CommandsApi;
//! use slashgate::command::domain::{
//!     ActingPrincipal, CommandDescriptor, MessageContext, RoomId, UserId, handler_fn,
//! };
//! use slashgate::config::PaginationConfig;
//!
//! let registry = InMemoryCommandRegistry::with_commands([CommandDescriptor::new(
//!     "echo",
//!     handler_fn(|_: &ActingPrincipal, params: &str, _: &MessageContext| {
//!         Ok(Value::String(params.to_owned()))
//!     }),
//! )])
//! .expect("valid command");
//! let gate = StaticRoomAccessGate::new().with_room(RoomId::new("R1"), RoomPolicy::public());
//! let api = CommandsApi::new(
//!     Arc::new(registry),
//!     Arc::new(gate),
//!     Arc::new(JsonResultProcessor),
//!     PaginationConfig::default(),
//! );
//!
//! let mut body = Map::new();
//! body.insert("command".to_owned(), json!("ECHO"));
//! body.insert("params".to_owned(), json!("hi"));
//! body.insert("roomId".to_owned(), json!("R1"));
//!
//! let principal = ActingPrincipal::new(UserId::new("u1"));
//! let runtime = tokio::runtime::Runtime::new().expect("runtime");
//! let response = runtime
//!     .block_on(api.run(&principal, &body))
//!     .expect("access granted");
//! assert_eq!(
//!     response.payload().and_then(|payload| payload.get("result")),
//!     Some(&json!("hi"))
//! );
//! ```

pub mod adapters;
pub mod api;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
