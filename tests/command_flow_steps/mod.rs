//! Step definitions for slash-command request scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
