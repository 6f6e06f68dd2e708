//! Wire form of a query plan
//!
//! Mirrors the structured output contract of the external planner.
//! Field names are camelCase on the wire; everything is optional and
//! nothing is assumed valid.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A plan as returned by the planner, before sanitization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlan {
    /// Free-text explanation of how the planner read the query
    pub interpretation: String,
    /// Planner's classification of the query (select/aggregate/...)
    pub query_type: Option<String>,
    /// Display-only SQL string; never executed
    pub sql_query: Option<String>,
    /// Ordered operation list
    pub operations: Vec<RawOperation>,
    /// Equality joins for multi-table queries
    pub joins: Option<Vec<RawJoin>>,
    /// Specific fields to select; currently display-only
    pub select_fields: Option<Vec<String>>,
}

/// One unvalidated plan step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOperation {
    /// Operation kind: filter/sort/aggregate/groupby/limit
    #[serde(rename = "type")]
    pub kind: String,
    /// Table the step targets (informational)
    pub table: Option<String>,
    /// Field the step reads
    pub field: Option<String>,
    /// Comparator, aggregator, or sort direction symbol
    pub condition: Option<String>,
    /// Comparison value / limit count
    pub value: Option<Value>,
}

/// One unvalidated join step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawJoin {
    pub from_table: String,
    pub to_table: String,
    pub from_field: String,
    pub to_field: String,
    /// Declared join type; the interpreter always left-merges
    pub join_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_planner_output() {
        let plan: RawPlan = serde_json::from_value(json!({
            "interpretation": "Top students by GPA",
            "queryType": "select",
            "sqlQuery": "SELECT * FROM students ORDER BY gpa DESC LIMIT 3;",
            "operations": [
                {"type": "sort", "field": "gpa", "condition": "desc"},
                {"type": "limit", "value": 3}
            ],
            "joins": [
                {"fromTable": "students", "toTable": "courses",
                 "fromField": "course_id", "toField": "id"}
            ]
        }))
        .unwrap();

        assert_eq!(plan.operations.len(), 2);
        assert_eq!(plan.operations[0].kind, "sort");
        assert_eq!(plan.joins.as_ref().unwrap()[0].to_field, "id");
    }

    #[test]
    fn test_missing_fields_default() {
        let plan: RawPlan = serde_json::from_value(json!({})).unwrap();
        assert!(plan.operations.is_empty());
        assert!(plan.joins.is_none());
        assert!(plan.interpretation.is_empty());
    }
}
