//! Row sorting
//!
//! Numeric comparison when both values are JSON numbers, otherwise
//! case-insensitive string comparison on coerced text forms. The sort
//! is stable.

use std::cmp::Ordering;

use serde_json::Value;

use crate::plan::Condition;
use crate::record::Row;

use super::coerce::as_lower_text;

/// Sort direction; ascending unless the plan says `desc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction from an optional plan condition. Absent or
    /// unrecognized symbols default to ascending.
    pub fn from_condition(condition: Option<Condition>) -> Self {
        match condition {
            Some(Condition::Desc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Sorts rows by a single field
pub struct RowSorter;

impl RowSorter {
    /// Sorts in place, stably
    pub fn sort(rows: &mut [Row], field: &str, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let ordering = Self::compare_values(a.get(field), b.get(field));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two optional field values.
    ///
    /// Missing values sort first; two numbers compare numerically;
    /// everything else compares on lowercased text forms.
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Value::Number(a_n)), Some(Value::Number(b_n))) => {
                let a_f = a_n.as_f64().unwrap_or(0.0);
                let b_f = b_n.as_f64().unwrap_or(0.0);
                a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
            }
            (Some(a_v), Some(b_v)) => as_lower_text(a_v).cmp(&as_lower_text(b_v)),
        }
    }
}
