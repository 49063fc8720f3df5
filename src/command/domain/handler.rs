//! Capability traits implemented by command behaviour.
//!
//! A command always has a [`CommandHandler`]. Preview support is split into
//! two optional capabilities: [`PreviewHandler`] produces the selectable
//! items and [`PreviewExecuteHandler`] runs the item the user picked.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::{ActingPrincipal, MessageContext, PreviewItem, PreviewPayload};

/// Result type for handler invocations.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Runs a command.
pub trait CommandHandler: Send + Sync {
    /// Executes the command as `principal` against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the command cannot complete.
    fn execute(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
    ) -> HandlerResult<Value>;
}

/// Generates previews for a command.
pub trait PreviewHandler: Send + Sync {
    /// Builds the preview for `params` as `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when no preview can be produced.
    fn preview(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
    ) -> HandlerResult<PreviewPayload>;
}

/// Executes a previously previewed item.
pub trait PreviewExecuteHandler: Send + Sync {
    /// Runs `item` as `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the item cannot be executed.
    fn execute_preview(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
        item: &PreviewItem,
    ) -> HandlerResult<()>;
}

/// Errors raised by command handlers.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// The handler refused the supplied parameters.
    #[error("command rejected its parameters: {0}")]
    Rejected(String),

    /// The handler failed while running.
    #[error("command failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wraps an underlying failure.
    pub fn failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Arc::new(err))
    }
}

/// Adapter turning a closure into a handler capability.
#[derive(Clone)]
pub struct FnHandler<F>(F);

/// Wraps a closure as a [`CommandHandler`].
pub const fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext) -> HandlerResult<Value> + Send + Sync,
{
    FnHandler(f)
}

/// Wraps a closure as a [`PreviewHandler`].
pub const fn preview_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext) -> HandlerResult<PreviewPayload>
        + Send
        + Sync,
{
    FnHandler(f)
}

/// Wraps a closure as a [`PreviewExecuteHandler`].
pub const fn preview_execute_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext, &PreviewItem) -> HandlerResult<()>
        + Send
        + Sync,
{
    FnHandler(f)
}

impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext) -> HandlerResult<Value> + Send + Sync,
{
    fn execute(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
    ) -> HandlerResult<Value> {
        (self.0)(principal, params, context)
    }
}

impl<F> PreviewHandler for FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext) -> HandlerResult<PreviewPayload>
        + Send
        + Sync,
{
    fn preview(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
    ) -> HandlerResult<PreviewPayload> {
        (self.0)(principal, params, context)
    }
}

impl<F> PreviewExecuteHandler for FnHandler<F>
where
    F: Fn(&ActingPrincipal, &str, &MessageContext, &PreviewItem) -> HandlerResult<()>
        + Send
        + Sync,
{
    fn execute_preview(
        &self,
        principal: &ActingPrincipal,
        params: &str,
        context: &MessageContext,
        item: &PreviewItem,
    ) -> HandlerResult<()> {
        (self.0)(principal, params, context, item)
    }
}
