//! Request handlers for the `commands.*` operations.

use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use super::envelope::ApiResponse;
use super::pagination::{JsonQuery, Pagination};
use super::request::{
    COMMAND_NOT_FOUND, InvocationMessages, InvocationRequest, PREVIEW_EXECUTE_MESSAGES,
    PREVIEW_MESSAGES, RUN_MESSAGES, is_truthy, string_field,
};
use crate::command::{
    domain::{ActingPrincipal, CommandDescriptor, MessageContext, PreviewItem},
    error::CommandResult,
    ports::{CommandRegistry, QueryOptions, ResultQueryProcessor, RoomAccessGate, SortSpec},
    services::CommandExecutor,
};
use crate::config::PaginationConfig;

const COMMAND_PARAM_REQUIRED: &str = "The query param \"command\" must be provided.";
const PREVIEW_ITEM_REQUIRED: &str = "The preview item being executed must be provided.";
const PREVIEW_ITEM_MALFORMED: &str = "The preview item being executed is in the wrong format.";

/// Looks up, lists, runs, and previews slash commands.
///
/// Each operation returns `Ok(ApiResponse)` for both successes and validated
/// failures. Access denial and handler faults are returned as `Err` and must
/// not be shown to clients as ordinary failures.
pub struct CommandsApi<R, G, Q>
where
    R: CommandRegistry,
    G: RoomAccessGate,
    Q: ResultQueryProcessor,
{
    registry: Arc<R>,
    executor: CommandExecutor<R>,
    access_gate: Arc<G>,
    query_processor: Arc<Q>,
    pagination: PaginationConfig,
}

impl<R, G, Q> CommandsApi<R, G, Q>
where
    R: CommandRegistry,
    G: RoomAccessGate,
    Q: ResultQueryProcessor,
{
    /// Creates the request layer.
    #[must_use]
    pub fn new(
        registry: Arc<R>,
        access_gate: Arc<G>,
        query_processor: Arc<Q>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            executor: CommandExecutor::new(Arc::clone(&registry)),
            registry,
            access_gate,
            query_processor,
            pagination,
        }
    }

    /// `commands.get`: returns one command by case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::error::CommandFault::Registry`] when the
    /// registry cannot be read.
    pub fn get(&self, query: &Map<String, Value>) -> CommandResult<ApiResponse> {
        let Some(name) = string_field(query, "command") else {
            return Ok(ApiResponse::failure(COMMAND_PARAM_REQUIRED));
        };
        let Some(descriptor) = self.registry.lookup(name)? else {
            debug!(command = name, "command lookup missed");
            return Ok(ApiResponse::failure(format!(
                "There is no command in the system by the name of: {name}"
            )));
        };
        Ok(ApiResponse::success_with([("command", json!(&*descriptor))]))
    }

    /// `commands.list`: returns a page of registered commands.
    ///
    /// A `query.command` filter matches names exactly, without case
    /// normalisation. `total` counts the filtered set before paging, and
    /// `count` is the size of the returned page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::error::CommandFault::Registry`] when the
    /// registry cannot be read.
    pub fn list(&self, query: &Map<String, Value>) -> CommandResult<ApiResponse> {
        let pagination = Pagination::from_query(query, &self.pagination);
        let json_query = match JsonQuery::from_query(query) {
            Ok(json_query) => json_query,
            Err(message) => return Ok(ApiResponse::failure(message)),
        };

        let mut commands = self.registry.list_all()?;
        if let Some(filter) = json_query
            .query
            .as_ref()
            .and_then(|filter| filter.get("command"))
            .filter(|filter| is_truthy(filter))
        {
            commands.retain(|descriptor| filter.as_str() == Some(descriptor.name()));
        }

        let total = commands.len();
        let records = commands
            .iter()
            .map(|descriptor| json!(&**descriptor))
            .collect();
        let options = QueryOptions {
            sort: json_query
                .sort
                .unwrap_or_else(|| SortSpec::ascending("name")),
            skip: pagination.offset,
            limit: pagination.count,
            fields: json_query.fields,
        };
        let page = self.query_processor.process(records, &options);

        let count = page.len();
        Ok(ApiResponse::success_with([
            ("commands", Value::Array(page)),
            ("offset", json!(pagination.offset)),
            ("count", json!(count)),
            ("total", json!(total)),
        ]))
    }

    /// `commands.run`: executes a command in a room as `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::error::CommandFault`] when the access gate
    /// rejects the request or the handler fails.
    pub async fn run(
        &self,
        principal: &ActingPrincipal,
        body: &Map<String, Value>,
    ) -> CommandResult<ApiResponse> {
        let request = match self.validate_invocation(body, &RUN_MESSAGES)? {
            Ok(request) => request,
            Err(failure) => return Ok(failure),
        };
        self.authorize(principal, &request).await?;

        let context = MessageContext::for_run(
            request.room_id.clone(),
            &request.command,
            &request.params,
        );
        let result = self
            .executor
            .run(principal, &request.command, &request.params, &context)?;
        Ok(ApiResponse::success_with([("result", result)]))
    }

    /// `commands.preview` (read): generates previews for a command.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::error::CommandFault`] when the access gate
    /// rejects the request, the command has no preview generator, or the
    /// handler fails.
    pub async fn preview(
        &self,
        principal: &ActingPrincipal,
        query: &Map<String, Value>,
    ) -> CommandResult<ApiResponse> {
        let request = match self.validate_invocation(query, &PREVIEW_MESSAGES)? {
            Ok(request) => request,
            Err(failure) => return Ok(failure),
        };
        self.authorize(principal, &request).await?;

        let context = MessageContext::for_room(request.room_id.clone());
        let preview =
            self.executor
                .preview(principal, &request.command, &request.params, &context)?;
        Ok(ApiResponse::success_with([("preview", json!(preview))]))
    }

    /// `commands.preview` (write): executes a previewed item.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::error::CommandFault`] when the access gate
    /// rejects the request, the command cannot execute preview items, or the
    /// handler fails.
    pub async fn execute_preview(
        &self,
        principal: &ActingPrincipal,
        body: &Map<String, Value>,
    ) -> CommandResult<ApiResponse> {
        let request = match InvocationRequest::parse(body, &PREVIEW_EXECUTE_MESSAGES) {
            Ok(request) => request,
            Err(message) => return Ok(reject(message)),
        };
        let Some(raw_item) = body.get("previewItem") else {
            return Ok(reject(PREVIEW_ITEM_REQUIRED));
        };
        let item = match PreviewItem::from_value(raw_item) {
            Ok(item) => item,
            Err(error) => {
                debug!(%error, "preview item rejected");
                return Ok(reject(PREVIEW_ITEM_MALFORMED));
            }
        };
        if self.runnable(&request.command)?.is_none() {
            return Ok(reject(COMMAND_NOT_FOUND));
        }
        self.authorize(principal, &request).await?;

        let context = MessageContext::for_room(request.room_id.clone());
        self.executor.execute_preview(
            principal,
            &request.command,
            &request.params,
            &context,
            &item,
        )?;
        Ok(ApiResponse::success())
    }

    /// Validates invocation fields and that the command is runnable.
    ///
    /// The outer `Result` carries registry faults; the inner one carries the
    /// validated failure to return to the client.
    fn validate_invocation(
        &self,
        fields: &Map<String, Value>,
        messages: &InvocationMessages,
    ) -> CommandResult<Result<InvocationRequest, ApiResponse>> {
        let request = match InvocationRequest::parse(fields, messages) {
            Ok(request) => request,
            Err(message) => return Ok(Err(reject(message))),
        };
        if self.runnable(&request.command)?.is_none() {
            return Ok(Err(reject(COMMAND_NOT_FOUND)));
        }
        Ok(Ok(request))
    }

    fn runnable(&self, command: &str) -> CommandResult<Option<Arc<CommandDescriptor>>> {
        Ok(self
            .registry
            .lookup(command)?
            .filter(|descriptor| descriptor.is_enabled()))
    }

    async fn authorize(
        &self,
        principal: &ActingPrincipal,
        request: &InvocationRequest,
    ) -> CommandResult<()> {
        self.access_gate
            .check_access(principal, &request.room_id)
            .await
            .inspect_err(|error| {
                warn!(
                    user_id = %principal.user_id(),
                    room_id = %request.room_id,
                    code = error.code(),
                    "room access denied"
                );
            })?;
        Ok(())
    }
}

fn reject(message: &str) -> ApiResponse {
    debug!(reason = message, "request rejected");
    ApiResponse::failure(message)
}
