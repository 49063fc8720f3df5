//! Slashgate: slash-command API for chat rooms.
//!
//! This crate provides a registry of named slash commands and the request
//! layer that looks them up, lists them, runs them, and previews them on
//! behalf of an authenticated user inside a room.
//!
//! # Architecture
//!
//! Slashgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure command types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, HTTP)
//!
//! # Modules
//!
//! - [`command`]: Command registry, execution, and request handling
//! - [`config`]: Server configuration

pub mod command;
pub mod config;
