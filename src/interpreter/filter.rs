//! Row filtering
//!
//! Filters rows against a single condition with defensive coercion.
//! Numeric comparators exclude rows whose values have no numeric form;
//! text comparators are case-insensitive. A non-comparator condition
//! passes every row through.

use serde_json::Value;

use crate::plan::Condition;
use crate::record::Row;

use super::coerce::{as_lower_text, as_number};

/// Evaluates filter conditions against rows
pub struct RowFilter;

impl RowFilter {
    /// Applies a filter, keeping matching rows
    pub fn apply(rows: Vec<Row>, field: &str, condition: Condition, value: &Value) -> Vec<Row> {
        rows.into_iter()
            .filter(|row| Self::matches(row, field, condition, value))
            .collect()
    }

    /// Checks one row against the condition.
    ///
    /// A row with a missing or null field value never matches.
    pub fn matches(row: &Row, field: &str, condition: Condition, value: &Value) -> bool {
        let field_value = match row.get(field) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        match condition {
            Condition::Gt => Self::numeric(field_value, value, |a, b| a > b),
            Condition::Lt => Self::numeric(field_value, value, |a, b| a < b),
            Condition::Gte => Self::numeric(field_value, value, |a, b| a >= b),
            Condition::Lte => Self::numeric(field_value, value, |a, b| a <= b),
            Condition::Eq => as_lower_text(field_value) == as_lower_text(value),
            Condition::Neq => as_lower_text(field_value) != as_lower_text(value),
            Condition::Contains => {
                as_lower_text(field_value).contains(&as_lower_text(value))
            }
            Condition::StartsWith => {
                as_lower_text(field_value).starts_with(&as_lower_text(value))
            }
            Condition::EndsWith => as_lower_text(field_value).ends_with(&as_lower_text(value)),
            // Aggregators and sort directions are not row predicates:
            // pass-through default
            _ => true,
        }
    }

    fn numeric(field_value: &Value, value: &Value, cmp: fn(f64, f64) -> bool) -> bool {
        match (as_number(field_value), as_number(value)) {
            (Some(a), Some(b)) => cmp(a, b),
            _ => false,
        }
    }
}
