//! Result query-processing port.
//!
//! Listing endpoints hand their filtered records to a processor that applies
//! sorting, paging, and field projection.

use serde_json::Value;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Ordered list of sort keys; earlier keys take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(Vec<(String, SortDirection)>);

impl SortSpec {
    /// Creates a sort specification from ordered keys.
    #[must_use]
    pub const fn new(keys: Vec<(String, SortDirection)>) -> Self {
        Self(keys)
    }

    /// Sorts ascending on a single field.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self(vec![(field.into(), SortDirection::Ascending)])
    }

    /// Returns the ordered keys.
    #[must_use]
    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.0
    }
}

/// Field projection applied to each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProjection {
    /// Keep only the listed fields.
    Include(Vec<String>),
    /// Drop the listed fields.
    Exclude(Vec<String>),
}

/// Options for a single query-processing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Sort order applied first.
    pub sort: SortSpec,
    /// Records skipped after sorting.
    pub skip: usize,
    /// Maximum records returned; `None` is unlimited.
    pub limit: Option<usize>,
    /// Optional projection applied last.
    pub fields: Option<FieldProjection>,
}

/// Applies sorting, paging, and projection to in-memory records.
pub trait ResultQueryProcessor: Send + Sync {
    /// Processes `records` according to `options`.
    fn process(&self, records: Vec<Value>, options: &QueryOptions) -> Vec<Value>;
}
