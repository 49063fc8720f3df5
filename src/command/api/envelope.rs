//! Uniform success/failure response envelope.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Outcome of a validated request.
///
/// Success responses flatten their payload next to `"success": true`;
/// failures carry a single `message` next to `"success": false`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// The request succeeded with the given top-level payload fields.
    Success(Map<String, Value>),
    /// The request was rejected with a client-facing message.
    Failure(String),
}

impl ApiResponse {
    /// Creates an empty success.
    #[must_use]
    pub fn success() -> Self {
        Self::Success(Map::new())
    }

    /// Creates a success carrying the given payload fields.
    #[must_use]
    pub fn success_with<K>(fields: impl IntoIterator<Item = (K, Value)>) -> Self
    where
        K: Into<String>,
    {
        Self::Success(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Creates a failure with a client-facing message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Returns whether this is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success payload.
    #[must_use]
    pub const fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

impl Serialize for ApiResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Success(payload) => {
                let mut map = serializer.serialize_map(Some(payload.len() + 1))?;
                map.serialize_entry("success", &true)?;
                for (key, value) in payload {
                    if key != "success" {
                        map.serialize_entry(key, value)?;
                    }
                }
                map.end()
            }
            Self::Failure(message) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("message", message)?;
                map.end()
            }
        }
    }
}
