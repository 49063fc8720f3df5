//! Fatal errors raised while serving command requests.
//!
//! Validated failures (bad input, unknown command) are not errors; they are
//! returned as [`crate::command::api::ApiResponse::Failure`]. Everything in
//! [`CommandFault`] propagates out of the request layer unconverted.

use thiserror::Error;

use super::domain::HandlerError;
use super::ports::{RegistryError, RoomAccessError};

/// Faults that abort a command request.
#[derive(Debug, Clone, Error)]
pub enum CommandFault {
    /// The access gate rejected the principal or the room.
    #[error(transparent)]
    Access(#[from] RoomAccessError),

    /// The registry could not be read.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The command disappeared between validation and dispatch.
    #[error("command '/{0}' is not registered")]
    UnknownCommand(String),

    /// The command has no preview generator.
    #[error("command '/{0}' does not provide previews")]
    MissingPreviewHandler(String),

    /// The command cannot execute preview items.
    #[error("command '/{0}' cannot execute preview items")]
    MissingPreviewExecuteHandler(String),

    /// The command's handler failed.
    #[error("command '/{command}' failed: {source}")]
    Handler {
        /// Command name.
        command: String,
        /// Handler error.
        #[source]
        source: HandlerError,
    },
}

/// Result type for command request operations.
pub type CommandResult<T> = Result<T, CommandFault>;
