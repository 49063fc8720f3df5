//! Preview payloads and selectable preview items.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One selectable option from a preview, later submitted back for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    /// Item identifier, unique within its preview.
    pub id: String,
    /// Renderability tag such as `image`, `link`, or `text`.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Item value. Any JSON value is accepted, including `null` and `""`.
    pub value: Value,
}

impl PreviewItem {
    /// Creates a preview item.
    #[must_use]
    pub fn new(id: impl Into<String>, item_type: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            value,
        }
    }

    /// Validates a raw JSON value submitted as a preview item.
    ///
    /// `id` and `type` must be non-empty strings. `value` only has to be
    /// present: an empty string or `null` is a valid value.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewItemError`] describing the first rule that failed.
    pub fn from_value(raw: &Value) -> Result<Self, PreviewItemError> {
        let fields = raw.as_object().ok_or(PreviewItemError::NotAnObject)?;
        let id = non_empty_string(fields.get("id")).ok_or(PreviewItemError::MissingId)?;
        let item_type =
            non_empty_string(fields.get("type")).ok_or(PreviewItemError::MissingType)?;
        let value = fields
            .get("value")
            .cloned()
            .ok_or(PreviewItemError::MissingValue)?;
        Ok(Self::new(id, item_type, value))
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Reasons a submitted preview item is rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PreviewItemError {
    /// The item is not a JSON object.
    #[error("preview item must be an object")]
    NotAnObject,
    /// `id` is absent, empty, or not a string.
    #[error("preview item id must be a non-empty string")]
    MissingId,
    /// `type` is absent, empty, or not a string.
    #[error("preview item type must be a non-empty string")]
    MissingType,
    /// `value` is absent.
    #[error("preview item value must be provided")]
    MissingValue,
}

/// Result produced by a preview handler, returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPayload {
    /// Translation key for the preview title.
    pub i18n_title: String,
    /// Selectable items.
    pub items: Vec<PreviewItem>,
}

impl PreviewPayload {
    /// Creates a payload with no items.
    #[must_use]
    pub fn new(i18n_title: impl Into<String>) -> Self {
        Self {
            i18n_title: i18n_title.into(),
            items: Vec::new(),
        }
    }

    /// Appends an item.
    #[must_use]
    pub fn with_item(mut self, item: PreviewItem) -> Self {
        self.items.push(item);
        self
    }
}
