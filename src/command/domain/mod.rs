//! Domain types for the slash-command subsystem.
//!
//! This module contains the command descriptor, the capability traits a
//! command implements, and the per-invocation context types. None of these
//! types depend on transport or storage.

mod context;
mod descriptor;
mod handler;
mod ids;
mod preview;

pub use context::{ActingPrincipal, MessageContext};
pub use descriptor::CommandDescriptor;
pub use handler::{
    CommandHandler, FnHandler, HandlerError, HandlerResult, PreviewExecuteHandler,
    PreviewHandler, handler_fn, preview_execute_fn, preview_fn,
};
pub use ids::{MessageId, RoomId, UserId};
pub use preview::{PreviewItem, PreviewItemError, PreviewPayload};
