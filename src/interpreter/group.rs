//! Grouping and aggregation
//!
//! Groupby partitions rows by the string form of a field value,
//! preserving first-seen group order. A co-occurring aggregate fuses
//! into one grouped-aggregation step; otherwise groups collapse to
//! counts. Standalone aggregates collapse the whole row set.

use std::collections::HashMap;

use serde_json::Value;

use crate::plan::Condition;
use crate::record::Row;

use super::coerce::{as_number, as_text, number_value, round2};

/// Partitions rows by a field's string form, in first-seen order.
/// Missing and null values group under the literal key "Unknown".
pub fn group_rows(rows: &[Row], field: &str) -> Vec<(String, Vec<Row>)> {
    let mut groups: Vec<(String, Vec<Row>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let key = match row.get(field) {
            Some(v) if !v.is_null() => as_text(v),
            _ => "Unknown".to_string(),
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(row.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row.clone()]));
            }
        }
    }

    groups
}

/// Numeric forms of a field's values across rows; values that fail
/// coercion are excluded from the computation set
pub fn numeric_values(rows: &[Row], field: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(field).and_then(as_number))
        .collect()
}

/// One aggregation over a computation set.
///
/// An empty set yields 0 for avg/max/min; count reports the row count
/// of the set it was asked about.
pub fn aggregate_value(condition: Condition, values: &[f64], row_count: usize) -> f64 {
    match condition {
        Condition::Avg => {
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        Condition::Sum => values.iter().sum(),
        Condition::Max => values.iter().cloned().fold(None::<f64>, |acc, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        })
        .unwrap_or(0.0),
        Condition::Min => values.iter().cloned().fold(None::<f64>, |acc, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        })
        .unwrap_or(0.0),
        Condition::Count => row_count as f64,
        // Non-aggregators contribute the safe default
        _ => 0.0,
    }
}

/// Collapses each group to `{group_field: key, condition: result}`
pub fn grouped_aggregate(
    groups: Vec<(String, Vec<Row>)>,
    group_field: &str,
    agg_field: &str,
    agg_condition: Condition,
) -> Vec<Row> {
    groups
        .into_iter()
        .map(|(key, members)| {
            let values = numeric_values(&members, agg_field);
            let result = round2(aggregate_value(agg_condition, &values, members.len()));
            let mut row = Row::new();
            row.insert(group_field.to_string(), Value::String(key));
            row.insert(agg_condition.as_str().to_string(), number_value(result));
            row
        })
        .collect()
}

/// Collapses each group to `{group_field: key, count: size}`
pub fn group_counts(groups: Vec<(String, Vec<Row>)>, group_field: &str) -> Vec<Row> {
    groups
        .into_iter()
        .map(|(key, members)| {
            let mut row = Row::new();
            row.insert(group_field.to_string(), Value::String(key));
            row.insert("count".to_string(), number_value(members.len() as f64));
            row
        })
        .collect()
}

/// Collapses the whole row set to a single aggregate row:
/// `{label: result, "field": field, "operation": CONDITION}`
pub fn collapse_aggregate(rows: &[Row], field: &str, condition: Condition) -> Row {
    let values = numeric_values(rows, field);
    let result = round2(aggregate_value(condition, &values, rows.len()));
    let label = condition.aggregate_label().unwrap_or("result");

    let mut row = Row::new();
    row.insert(label.to_string(), number_value(result));
    row.insert("field".to_string(), Value::String(field.to_string()));
    row.insert(
        "operation".to_string(),
        Value::String(condition.as_str().to_uppercase()),
    );
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::row_of;
    use serde_json::json;

    fn dept_rows() -> Vec<Row> {
        vec![
            row_of(&[("dept", json!("A")), ("salary", json!(10))]),
            row_of(&[("dept", json!("A")), ("salary", json!(20))]),
            row_of(&[("dept", json!("B")), ("salary", json!(5))]),
        ]
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let groups = group_rows(&dept_rows(), "dept");
        assert_eq!(groups[0].0, "A");
        assert_eq!(groups[1].0, "B");
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let rows = dept_rows();
        let groups = group_rows(&rows, "dept");
        let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, rows.len());
    }

    #[test]
    fn test_missing_and_null_group_as_unknown() {
        let rows = vec![
            row_of(&[("dept", json!(null)), ("salary", json!(1))]),
            row_of(&[("salary", json!(2))]),
            row_of(&[("dept", json!(false)), ("salary", json!(3))]),
        ];
        let groups = group_rows(&rows, "dept");
        assert_eq!(groups[0].0, "Unknown");
        assert_eq!(groups[0].1.len(), 2);
        // false is a real value, not Unknown
        assert_eq!(groups[1].0, "false");
    }

    #[test]
    fn test_aggregate_values() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(aggregate_value(Condition::Sum, &values, 3), 60.0);
        assert_eq!(aggregate_value(Condition::Avg, &values, 3), 20.0);
        assert_eq!(aggregate_value(Condition::Max, &values, 3), 30.0);
        assert_eq!(aggregate_value(Condition::Min, &values, 3), 10.0);
        assert_eq!(aggregate_value(Condition::Count, &values, 3), 3.0);
    }

    #[test]
    fn test_empty_computation_set_defaults() {
        assert_eq!(aggregate_value(Condition::Avg, &[], 0), 0.0);
        assert_eq!(aggregate_value(Condition::Max, &[], 0), 0.0);
        assert_eq!(aggregate_value(Condition::Min, &[], 0), 0.0);
        // count reports the row count even when nothing coerced
        assert_eq!(aggregate_value(Condition::Count, &[], 4), 4.0);
    }

    #[test]
    fn test_grouped_average() {
        let groups = group_rows(&dept_rows(), "dept");
        let rows = grouped_aggregate(groups, "dept", "salary", Condition::Avg);
        assert_eq!(rows[0].get("dept"), Some(&json!("A")));
        assert_eq!(rows[0].get("avg"), Some(&json!(15)));
        assert_eq!(rows[1].get("dept"), Some(&json!("B")));
        assert_eq!(rows[1].get("avg"), Some(&json!(5)));
    }

    #[test]
    fn test_group_counts() {
        let groups = group_rows(&dept_rows(), "dept");
        let rows = group_counts(groups, "dept");
        assert_eq!(rows[0].get("count"), Some(&json!(2)));
        assert_eq!(rows[1].get("count"), Some(&json!(1)));
    }

    #[test]
    fn test_collapse_aggregate_row_shape() {
        let row = collapse_aggregate(&dept_rows(), "salary", Condition::Sum);
        assert_eq!(row.get("total"), Some(&json!(35)));
        assert_eq!(row.get("field"), Some(&json!("salary")));
        assert_eq!(row.get("operation"), Some(&json!("SUM")));
    }

    #[test]
    fn test_non_numeric_values_excluded() {
        let rows = vec![
            row_of(&[("v", json!(10))]),
            row_of(&[("v", json!("oops"))]),
            row_of(&[("v", json!(20))]),
        ];
        let row = collapse_aggregate(&rows, "v", Condition::Avg);
        assert_eq!(row.get("average"), Some(&json!(15)));
        // count still reports all rows
        let row = collapse_aggregate(&rows, "v", Condition::Count);
        assert_eq!(row.get("count"), Some(&json!(3)));
    }
}
