//! JSON-value query processor.
//!
//! Sorts, pages, and projects serialised records in memory. Values compare
//! by type first (`null` and missing, numbers, strings, objects, arrays,
//! booleans), then by value within a type.

use serde_json::Value;
use std::cmp::Ordering;

use crate::command::ports::{FieldProjection, QueryOptions, ResultQueryProcessor, SortDirection};

/// Applies [`QueryOptions`] to top-level fields of JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResultProcessor;

impl ResultQueryProcessor for JsonResultProcessor {
    fn process(&self, mut records: Vec<Value>, options: &QueryOptions) -> Vec<Value> {
        let keys = options.sort.keys();
        if !keys.is_empty() {
            records.sort_by(|left, right| {
                keys.iter()
                    .map(|(field, direction)| {
                        let ordering = compare_values(left.get(field), right.get(field));
                        match direction {
                            SortDirection::Ascending => ordering,
                            SortDirection::Descending => ordering.reverse(),
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        records
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .map(|record| project(record, options.fields.as_ref()))
            .collect()
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

fn project(record: Value, fields: Option<&FieldProjection>) -> Value {
    let Some(projection) = fields else {
        return record;
    };
    let mut object = match record {
        Value::Object(object) => object,
        other => return other,
    };
    match projection {
        FieldProjection::Include(names) => {
            object.retain(|key, _| names.iter().any(|name| name == key));
        }
        FieldProjection::Exclude(names) => {
            object.retain(|key, _| !names.iter().any(|name| name == key));
        }
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ports::SortSpec;
    use rstest::rstest;
    use serde_json::json;

    fn options(sort: SortSpec) -> QueryOptions {
        QueryOptions {
            sort,
            skip: 0,
            limit: None,
            fields: None,
        }
    }

    fn names(records: &[Value]) -> Vec<&str> {
        records
            .iter()
            .filter_map(|record| record.get("name").and_then(Value::as_str))
            .collect()
    }

    fn records() -> Vec<Value> {
        vec![
            json!({ "name": "tableflip", "enabled": true }),
            json!({ "name": "gimme", "enabled": false }),
            json!({ "name": "shrug", "enabled": true }),
        ]
    }

    #[rstest]
    fn sorts_ascending_by_name() {
        let page = JsonResultProcessor.process(records(), &options(SortSpec::ascending("name")));

        assert_eq!(names(&page), ["gimme", "shrug", "tableflip"]);
    }

    #[rstest]
    fn later_keys_break_ties() {
        let sort = SortSpec::new(vec![
            ("enabled".to_owned(), SortDirection::Descending),
            ("name".to_owned(), SortDirection::Descending),
        ]);

        let page = JsonResultProcessor.process(records(), &options(sort));

        assert_eq!(names(&page), ["tableflip", "shrug", "gimme"]);
    }

    #[rstest]
    fn missing_fields_sort_first() {
        let input = vec![json!({ "name": "b" }), json!({ "other": 1 })];

        let page = JsonResultProcessor.process(input, &options(SortSpec::ascending("name")));

        assert_eq!(page.first(), Some(&json!({ "other": 1 })));
    }

    #[rstest]
    #[case(1, Some(1), vec!["shrug"])]
    #[case(2, None, vec!["tableflip"])]
    #[case(5, Some(10), vec![])]
    fn skips_then_limits(
        #[case] skip: usize,
        #[case] limit: Option<usize>,
        #[case] expected: Vec<&str>,
    ) {
        let query = QueryOptions {
            skip,
            limit,
            ..options(SortSpec::ascending("name"))
        };

        let page = JsonResultProcessor.process(records(), &query);

        assert_eq!(names(&page), expected);
    }

    #[rstest]
    fn include_projection_keeps_listed_fields() {
        let query = QueryOptions {
            fields: Some(FieldProjection::Include(vec!["name".to_owned()])),
            ..options(SortSpec::ascending("name"))
        };

        let page = JsonResultProcessor.process(records(), &query);

        assert_eq!(page.first(), Some(&json!({ "name": "gimme" })));
    }

    #[rstest]
    fn exclude_projection_drops_listed_fields() {
        let query = QueryOptions {
            fields: Some(FieldProjection::Exclude(vec!["name".to_owned()])),
            ..options(SortSpec::ascending("name"))
        };

        let page = JsonResultProcessor.process(records(), &query);

        assert!(page.iter().all(|record| record.get("name").is_none()));
        assert_eq!(page.len(), 3);
    }
}
