//! Pagination and JSON query parsing for list requests.

use serde_json::{Map, Value};

use super::request::{is_truthy, unsigned_field};
use crate::command::ports::{FieldProjection, SortDirection, SortSpec};
use crate::config::PaginationConfig;

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Records skipped.
    pub offset: usize,
    /// Page size; `None` returns every remaining record.
    pub count: Option<usize>,
}

impl Pagination {
    /// Resolves `offset` and `count` query parameters against `config`.
    ///
    /// Unparsable values fall back to defaults. `count` is clamped to the
    /// upper limit, and `0` means unlimited only when the configuration
    /// allows it.
    #[must_use]
    pub fn from_query(query: &Map<String, Value>, config: &PaginationConfig) -> Self {
        let default_count = config.effective_default_count();
        let offset = unsigned_field(query, "offset").unwrap_or(0);
        let requested = unsigned_field(query, "count").unwrap_or(default_count);
        let count = match requested.min(config.effective_upper_count_limit()) {
            0 if config.allow_infinite_count => None,
            0 => Some(default_count),
            count => Some(count),
        };
        Self { offset, count }
    }
}

/// Sort, projection, and filter parsed from JSON-encoded query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonQuery {
    /// Requested sort order.
    pub sort: Option<SortSpec>,
    /// Requested field projection.
    pub fields: Option<FieldProjection>,
    /// Filter object.
    pub query: Option<Map<String, Value>>,
}

impl JsonQuery {
    /// Parses `sort`, `fields`, and `query` parameters.
    ///
    /// Each parameter is a JSON object, usually encoded as a string. Falsy
    /// parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns the client-facing failure message for the first malformed
    /// parameter.
    pub fn from_query(params: &Map<String, Value>) -> Result<Self, String> {
        let sort = json_object_param(params, "sort")?
            .map(|(raw, object)| parse_sort(&object).ok_or_else(|| invalid("sort", &raw)))
            .transpose()?;
        let fields = json_object_param(params, "fields")?
            .filter(|(_, object)| !object.is_empty())
            .map(|(raw, object)| parse_fields(&object).ok_or_else(|| invalid("fields", &raw)))
            .transpose()?;
        let query = json_object_param(params, "query")?.map(|(_, object)| object);
        Ok(Self {
            sort,
            fields,
            query,
        })
    }
}

fn invalid(name: &str, raw: &str) -> String {
    format!("Invalid {name} parameter provided: \"{raw}\"")
}

fn json_object_param(
    params: &Map<String, Value>,
    name: &str,
) -> Result<Option<(String, Map<String, Value>)>, String> {
    let Some(value) = params.get(name).filter(|value| is_truthy(value)) else {
        return Ok(None);
    };
    let (raw, parsed) = match value {
        Value::String(text) => (text.clone(), serde_json::from_str::<Value>(text).ok()),
        other => (other.to_string(), Some(other.clone())),
    };
    match parsed {
        Some(Value::Object(object)) => Ok(Some((raw, object))),
        _ => Err(invalid(name, &raw)),
    }
}

fn parse_sort(object: &Map<String, Value>) -> Option<SortSpec> {
    object
        .iter()
        .map(|(field, direction)| {
            let direction = match direction.as_i64()? {
                1 => SortDirection::Ascending,
                -1 => SortDirection::Descending,
                _ => return None,
            };
            Some((field.clone(), direction))
        })
        .collect::<Option<Vec<_>>>()
        .map(SortSpec::new)
}

fn parse_fields(object: &Map<String, Value>) -> Option<FieldProjection> {
    let names: Vec<String> = object.keys().cloned().collect();
    let mut flags = object.values().map(|flag| match flag {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().and_then(|n| match n {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }),
        _ => None,
    });
    let first = flags.next()??;
    if !flags.all(|flag| flag == Some(first)) {
        return None;
    }
    Some(if first {
        FieldProjection::Include(names)
    } else {
        FieldProjection::Exclude(names)
    })
}
