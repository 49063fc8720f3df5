//! HTTP transport for the `commands.*` operations.
//!
//! Routes live under `/api/v1`. Every route requires the `X-User-Id`
//! header; resolving it to an authenticated session is the job of whatever
//! sits in front of this router.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequestParts, Query, State, rejection::QueryRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::command::{
    api::{ApiResponse, CommandsApi},
    domain::{ActingPrincipal, UserId},
    error::{CommandFault, CommandResult},
    ports::{CommandRegistry, ResultQueryProcessor, RoomAccessError, RoomAccessGate},
};

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Builds the router for the command operations.
pub fn router<R, G, Q>(api: Arc<CommandsApi<R, G, Q>>) -> Router
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    Router::new()
        .route("/api/v1/commands.get", get(get_command::<R, G, Q>))
        .route("/api/v1/commands.list", get(list_commands::<R, G, Q>))
        .route("/api/v1/commands.run", post(run_command::<R, G, Q>))
        .route(
            "/api/v1/commands.preview",
            get(preview_command::<R, G, Q>).post(execute_preview::<R, G, Q>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(api)
}

/// The acting principal resolved from request headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub ActingPrincipal);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| Self(ActingPrincipal::new(UserId::new(value))))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ApiResponse::failure("You must be logged in to do this.")),
                )
                    .into_response()
            })
    }
}

type ApiState<R, G, Q> = State<Arc<CommandsApi<R, G, Q>>>;
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

async fn get_command<R, G, Q>(
    State(api): ApiState<R, G, Q>,
    _user: AuthenticatedUser,
    query: QueryPairs,
) -> Response
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    match query_map(query) {
        Ok(fields) => respond(api.get(&fields)),
        Err(rejection) => rejection,
    }
}

async fn list_commands<R, G, Q>(
    State(api): ApiState<R, G, Q>,
    _user: AuthenticatedUser,
    query: QueryPairs,
) -> Response
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    match query_map(query) {
        Ok(fields) => respond(api.list(&fields)),
        Err(rejection) => rejection,
    }
}

async fn run_command<R, G, Q>(
    State(api): ApiState<R, G, Q>,
    AuthenticatedUser(principal): AuthenticatedUser,
    body: Bytes,
) -> Response
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    respond(api.run(&principal, &body_map(&body)).await)
}

async fn preview_command<R, G, Q>(
    State(api): ApiState<R, G, Q>,
    AuthenticatedUser(principal): AuthenticatedUser,
    query: QueryPairs,
) -> Response
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    match query_map(query) {
        Ok(fields) => respond(api.preview(&principal, &fields).await),
        Err(rejection) => rejection,
    }
}

async fn execute_preview<R, G, Q>(
    State(api): ApiState<R, G, Q>,
    AuthenticatedUser(principal): AuthenticatedUser,
    body: Bytes,
) -> Response
where
    R: CommandRegistry + 'static,
    G: RoomAccessGate + 'static,
    Q: ResultQueryProcessor + 'static,
{
    respond(api.execute_preview(&principal, &body_map(&body)).await)
}

/// Collects query pairs into fields. A repeated key becomes an array of its
/// values, so string-typed field checks reject it.
fn query_map(query: QueryPairs) -> Result<Map<String, Value>, Response> {
    let Query(pairs) = query.map_err(|rejection| {
        debug!(%rejection, "query string rejected");
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure(rejection.body_text())),
        )
            .into_response()
    })?;
    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    Ok(fields)
}

/// Parses a JSON object body. Anything else is treated as an empty body.
fn body_map(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
}

fn respond(outcome: CommandResult<ApiResponse>) -> Response {
    match outcome {
        Ok(response) => {
            let status = if response.is_success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(response)).into_response()
        }
        Err(fault) => fault_response(&fault),
    }
}

fn fault_response(fault: &CommandFault) -> Response {
    let (status, code) = match fault {
        CommandFault::Access(error @ RoomAccessError::RoomNotFound(_)) => {
            (StatusCode::NOT_FOUND, error.code())
        }
        CommandFault::Access(
            error @ (RoomAccessError::InvalidUser | RoomAccessError::NotAllowed { .. }),
        ) => (StatusCode::FORBIDDEN, error.code()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "error-internal"),
    };
    error!(%fault, status = status.as_u16(), code, "command request aborted");
    (status, Json(json!({ "success": false, "error": code }))).into_response()
}
