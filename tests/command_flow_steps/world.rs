//! Shared world state for slash-command request scenarios.

use std::sync::Arc;

use rstest::fixture;
use slashgate::command::{
    adapters::{
        memory::{InMemoryCommandRegistry, StaticRoomAccessGate},
        query::JsonResultProcessor,
    },
    api::{ApiResponse, CommandsApi},
    domain::PreviewItem,
    error::CommandResult,
};
use slashgate::config::PaginationConfig;

/// Request layer type used by the BDD world.
pub type TestApi = CommandsApi<InMemoryCommandRegistry, StaticRoomAccessGate, JsonResultProcessor>;

/// The last preview request and the items it produced.
pub struct PreviewState {
    /// Requesting user.
    pub user: String,
    /// Previewed command.
    pub command: String,
    /// Parameters sent with the preview.
    pub params: String,
    /// Room the preview was shown in.
    pub room: String,
    /// Items offered by the preview.
    pub items: Vec<PreviewItem>,
}

/// Scenario world for slash-command request behaviour tests.
#[derive(Default)]
pub struct CommandWorld {
    /// Registered commands.
    pub registry: Option<InMemoryCommandRegistry>,
    /// Rooms known to the access gate.
    pub gate: StaticRoomAccessGate,
    /// Outcome of the last request.
    pub last_outcome: Option<CommandResult<ApiResponse>>,
    /// Last successful preview.
    pub last_preview: Option<PreviewState>,
}

impl CommandWorld {
    /// Builds the request layer over the current registry and rooms.
    ///
    /// # Errors
    ///
    /// Returns an error when no registry has been set up.
    pub fn api(&self) -> eyre::Result<TestApi> {
        let registry = self
            .registry
            .clone()
            .ok_or_else(|| eyre::eyre!("no command registry in scenario world"))?;
        Ok(CommandsApi::new(
            Arc::new(registry),
            Arc::new(self.gate.clone()),
            Arc::new(JsonResultProcessor),
            PaginationConfig::default(),
        ))
    }

    /// Returns the last response, failing on a missing outcome or fault.
    ///
    /// # Errors
    ///
    /// Returns an error when no request ran or the request faulted.
    pub fn last_response(&self) -> eyre::Result<&ApiResponse> {
        match self.last_outcome.as_ref() {
            Some(Ok(response)) => Ok(response),
            Some(Err(fault)) => Err(eyre::eyre!("request faulted: {fault}")),
            None => Err(eyre::eyre!("no request outcome in scenario world")),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CommandWorld {
    CommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
