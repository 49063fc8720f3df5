//! Command execution service.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span};

use crate::command::{
    domain::{ActingPrincipal, CommandDescriptor, MessageContext, PreviewItem, PreviewPayload},
    error::{CommandFault, CommandResult},
    ports::CommandRegistry,
};

/// Dispatches invocations to registered command handlers.
///
/// Every invocation runs inside a tracing span attributed to the acting
/// principal. The span guard is dropped on every exit path, including
/// handler failures.
#[derive(Clone)]
pub struct CommandExecutor<R>
where
    R: CommandRegistry,
{
    registry: Arc<R>,
}

impl<R> CommandExecutor<R>
where
    R: CommandRegistry,
{
    /// Creates an executor reading from `registry`.
    #[must_use]
    pub const fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Runs `command` and returns the handler's result.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFault`] when the command is not registered, the
    /// registry fails, or the handler fails.
    pub fn run(
        &self,
        principal: &ActingPrincipal,
        command: &str,
        params: &str,
        context: &MessageContext,
    ) -> CommandResult<Value> {
        let descriptor = self.resolve(command)?;
        let span = invocation_span("run", &descriptor, principal, context);
        let _entered = span.enter();

        let result = descriptor
            .handler()
            .execute(principal, params, context)
            .map_err(|source| CommandFault::Handler {
                command: descriptor.name().to_owned(),
                source,
            })?;
        debug!("command completed");
        Ok(result)
    }

    /// Generates a preview for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFault::MissingPreviewHandler`] when the command has
    /// no preview generator, or another [`CommandFault`] when lookup or the
    /// handler fails.
    pub fn preview(
        &self,
        principal: &ActingPrincipal,
        command: &str,
        params: &str,
        context: &MessageContext,
    ) -> CommandResult<PreviewPayload> {
        let descriptor = self.resolve(command)?;
        let span = invocation_span("preview", &descriptor, principal, context);
        let _entered = span.enter();

        let handler = descriptor
            .preview_handler()
            .ok_or_else(|| CommandFault::MissingPreviewHandler(descriptor.name().to_owned()))?;
        let payload = handler
            .preview(principal, params, context)
            .map_err(|source| CommandFault::Handler {
                command: descriptor.name().to_owned(),
                source,
            })?;
        debug!(items = payload.items.len(), "preview generated");
        Ok(payload)
    }

    /// Executes a previewed `item` for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandFault::MissingPreviewExecuteHandler`] when the
    /// command cannot execute preview items, or another [`CommandFault`]
    /// when lookup or the handler fails.
    pub fn execute_preview(
        &self,
        principal: &ActingPrincipal,
        command: &str,
        params: &str,
        context: &MessageContext,
        item: &PreviewItem,
    ) -> CommandResult<()> {
        let descriptor = self.resolve(command)?;
        let span = invocation_span("execute_preview", &descriptor, principal, context);
        let _entered = span.enter();

        let handler = descriptor.preview_execute_handler().ok_or_else(|| {
            CommandFault::MissingPreviewExecuteHandler(descriptor.name().to_owned())
        })?;
        handler
            .execute_preview(principal, params, context, item)
            .map_err(|source| CommandFault::Handler {
                command: descriptor.name().to_owned(),
                source,
            })?;
        debug!(item_id = %item.id, "preview item executed");
        Ok(())
    }

    fn resolve(&self, command: &str) -> CommandResult<Arc<CommandDescriptor>> {
        self.registry
            .lookup(command)?
            .ok_or_else(|| CommandFault::UnknownCommand(command.to_lowercase()))
    }
}

fn invocation_span(
    stage: &'static str,
    descriptor: &CommandDescriptor,
    principal: &ActingPrincipal,
    context: &MessageContext,
) -> tracing::Span {
    info_span!(
        "slash_command",
        stage,
        command = descriptor.name(),
        room_id = %context.room_id(),
        user_id = %principal.user_id(),
    )
}
