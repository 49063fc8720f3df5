//! Shape validation for loosely-typed request fields.
//!
//! Query strings and JSON bodies arrive as untyped maps. Field checks follow
//! the rules clients already depend on: `command` and `roomId` must be
//! strings, while `params` is only rejected when it is truthy and not a
//! string.

use serde_json::{Map, Value};

use crate::command::domain::RoomId;

pub(super) const PARAMS_NOT_A_STRING: &str =
    "The parameters for the command must be a single string.";
pub(super) const COMMAND_NOT_FOUND: &str =
    "The command provided does not exist (or is disabled).";

/// Failure messages for one invocation endpoint.
pub(super) struct InvocationMessages {
    pub(super) missing_command: &'static str,
    pub(super) missing_room: &'static str,
}

pub(super) const RUN_MESSAGES: InvocationMessages = InvocationMessages {
    missing_command: "You must provide a command to run.",
    missing_room: "The room's id where to execute this command must be provided and be a string.",
};

pub(super) const PREVIEW_MESSAGES: InvocationMessages = InvocationMessages {
    missing_command: "You must provide a command to get the previews from.",
    missing_room: "The room's id where the previews are being displayed must be provided and be a string.",
};

pub(super) const PREVIEW_EXECUTE_MESSAGES: InvocationMessages = InvocationMessages {
    missing_command: "You must provide a command to run the preview item on.",
    missing_room: "The room's id where the preview is being executed in must be provided and be a string.",
};

/// A shape-valid command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct InvocationRequest {
    /// Lowercased command name, used for both existence check and dispatch.
    pub(super) command: String,
    /// Parameter string; falsy input becomes empty.
    pub(super) params: String,
    /// Target room.
    pub(super) room_id: RoomId,
}

impl InvocationRequest {
    /// Validates `command`, `params`, and `roomId` in that order.
    ///
    /// The first failing check wins.
    pub(super) fn parse(
        fields: &Map<String, Value>,
        messages: &InvocationMessages,
    ) -> Result<Self, &'static str> {
        let command = string_field(fields, "command").ok_or(messages.missing_command)?;
        let params = params_field(fields).ok_or(PARAMS_NOT_A_STRING)?;
        let room_id = string_field(fields, "roomId").ok_or(messages.missing_room)?;
        Ok(Self {
            command: command.to_lowercase(),
            params,
            room_id: RoomId::new(room_id),
        })
    }
}

/// Returns the field when it is present and a string.
pub(super) fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Resolves the optional `params` field.
///
/// Returns `None` when the field is truthy but not a string. Absent or falsy
/// values resolve to an empty string.
fn params_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("params") {
        Some(Value::String(params)) => Some(params.clone()),
        Some(value) if is_truthy(value) => None,
        _ => Some(String::new()),
    }
}

/// Loose truthiness: `null`, `false`, zero, and `""` are falsy.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads an unsigned integer from a string or number field.
pub(super) fn unsigned_field(fields: &Map<String, Value>, key: &str) -> Option<usize> {
    match fields.get(key)? {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.as_u64().and_then(|n| usize::try_from(n).ok()),
        _ => None,
    }
}
