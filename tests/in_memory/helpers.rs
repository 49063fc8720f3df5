//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use rstest::fixture;
use serde_json::{Map, Value};
use slashgate::command::{
    adapters::{
        builtin::builtin_commands,
        memory::{InMemoryCommandRegistry, StaticRoomAccessGate},
        query::JsonResultProcessor,
    },
    api::CommandsApi,
    domain::{ActingPrincipal, UserId},
};
use slashgate::config::ServerConfig;
use tokio::runtime::Runtime;

/// Request layer wired with in-memory adapters.
pub type InMemoryApi =
    CommandsApi<InMemoryCommandRegistry, StaticRoomAccessGate, JsonResultProcessor>;

/// Configuration used by the in-memory tests.
pub const CONFIG: &str = r#"{
    "pagination": { "default_count": 2, "upper_count_limit": 3, "allow_infinite_count": false },
    "rooms": {
        "GENERAL": { "public": true },
        "ops": { "members": ["alice"] }
    }
}"#;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides the parsed test configuration.
///
/// # Panics
///
/// Panics if [`CONFIG`] is not a valid configuration.
#[fixture]
pub fn config() -> ServerConfig {
    ServerConfig::from_json_str(CONFIG).expect("test configuration should parse")
}

/// Builds the request layer from `config` with the built-in commands.
///
/// # Panics
///
/// Panics if the built-in commands cannot be registered.
pub fn api_from_config(config: &ServerConfig) -> InMemoryApi {
    let registry = InMemoryCommandRegistry::with_commands(builtin_commands())
        .expect("built-in commands should register");
    CommandsApi::new(
        Arc::new(registry),
        Arc::new(StaticRoomAccessGate::from_config(&config.rooms)),
        Arc::new(JsonResultProcessor),
        config.pagination,
    )
}

/// Creates a principal for `user`.
pub fn principal(user: &str) -> ActingPrincipal {
    ActingPrincipal::new(UserId::new(user))
}

/// Converts a JSON object literal into a request field map.
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
