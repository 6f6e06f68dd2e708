//! Advisory field type inference
//!
//! Types are inferred per collection from a bounded sample of values.
//! The inference is advisory only: values within the same field may
//! disagree with it across records, so operations still coerce at the
//! point of use.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde_json::Value;

use super::types::Row;

/// Maximum number of rows sampled per field
pub const SAMPLE_LIMIT: usize = 10;

/// Advisory semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    Text,
    Bool,
    DateTime,
    List,
    Nested,
    Null,
}

impl FieldType {
    /// Classifies a single JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldType::Null,
            Value::Bool(_) => FieldType::Bool,
            Value::Number(_) => FieldType::Number,
            Value::String(s) => {
                if s.trim().parse::<f64>().is_ok() {
                    FieldType::Number
                } else if DateTime::parse_from_rfc3339(s).is_ok() {
                    FieldType::DateTime
                } else {
                    FieldType::Text
                }
            }
            Value::Array(_) => FieldType::List,
            Value::Object(_) => FieldType::Nested,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Text => "text",
            FieldType::Bool => "bool",
            FieldType::DateTime => "datetime",
            FieldType::List => "list",
            FieldType::Nested => "nested",
            FieldType::Null => "null",
        }
    }
}

/// Infers the schema of a collection from its first record's field set
/// and a bounded sample of values per field.
///
/// A field's type is the classification shared by every sampled
/// non-null value; mixed samples fall back to `Text`, and fields with
/// no non-null sample at all are `Null`.
pub fn infer_schema(rows: &[Row]) -> BTreeMap<String, FieldType> {
    let mut schema = BTreeMap::new();
    let Some(first) = rows.first() else {
        return schema;
    };

    for field in first.keys() {
        let mut inferred: Option<FieldType> = None;
        let mut mixed = false;

        for row in rows.iter().take(SAMPLE_LIMIT) {
            let value = match row.get(field) {
                Some(v) if !v.is_null() => v,
                _ => continue,
            };
            let ty = FieldType::of(value);
            match inferred {
                None => inferred = Some(ty),
                Some(seen) if seen != ty => {
                    mixed = true;
                    break;
                }
                Some(_) => {}
            }
        }

        let ty = if mixed {
            FieldType::Text
        } else {
            inferred.unwrap_or(FieldType::Null)
        };
        schema.insert(field.clone(), ty);
    }

    schema
}
