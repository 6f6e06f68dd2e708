//! Plan sanitization
//!
//! Applies the validation policy to a raw plan before any step runs:
//! unrecognized kinds/conditions and unknown fields are dropped with a
//! diagnostic, and string values are truncated to a bounded length to
//! cap comparison and memory cost from untrusted input.

use serde_json::Value;

use crate::observability::{Logger, Severity};
use crate::record::FieldProbe;

use super::op::{JoinSpec, Operation};
use super::raw::RawPlan;

/// Maximum length (in characters) of a string value after sanitization
pub const MAX_VALUE_LEN: usize = 1000;

/// Truncates string values to `MAX_VALUE_LEN` characters; other value
/// shapes pass through unchanged.
pub fn truncate_value(value: Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > MAX_VALUE_LEN => {
            Value::String(s.chars().take(MAX_VALUE_LEN).collect())
        }
        other => other,
    }
}

/// A dropped plan step and the reason it was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStep {
    /// "operation" or "join"
    pub step: &'static str,
    /// Zero-based position within its list
    pub index: usize,
    /// Human-readable reason
    pub reason: String,
}

impl SkippedStep {
    fn new(step: &'static str, index: usize, reason: String) -> Self {
        Self { step, index, reason }
    }

    /// One-line description for diagnostics and API responses
    pub fn describe(&self) -> String {
        format!("{} {} skipped: {}", self.step, self.index, self.reason)
    }
}

/// A plan after validation: only executable steps remain
#[derive(Debug, Clone, Default)]
pub struct SanitizedPlan {
    pub operations: Vec<Operation>,
    pub joins: Vec<JoinSpec>,
    pub skipped: Vec<SkippedStep>,
}

impl SanitizedPlan {
    /// Returns true if nothing survived validation
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.joins.is_empty()
    }
}

/// Validates every step of a raw plan against the field probe.
///
/// Invalid steps are dropped, logged at WARN, and recorded in the
/// result's `skipped` list; the remaining steps keep their relative
/// order. This function never fails.
pub fn sanitize_plan(raw: &RawPlan, probe: &FieldProbe) -> SanitizedPlan {
    let mut plan = SanitizedPlan::default();

    if let Some(joins) = &raw.joins {
        for (index, raw_join) in joins.iter().enumerate() {
            match JoinSpec::from_raw(raw_join, probe) {
                Ok(join) => plan.joins.push(join),
                Err(reason) => {
                    Logger::log(
                        Severity::Warn,
                        "plan_join_skipped",
                        &[("index", &index.to_string()), ("reason", &reason)],
                    );
                    plan.skipped.push(SkippedStep::new("join", index, reason));
                }
            }
        }
    }

    for (index, raw_op) in raw.operations.iter().enumerate() {
        match Operation::from_raw(raw_op, probe) {
            Ok(op) => plan.operations.push(op),
            Err(reason) => {
                Logger::log(
                    Severity::Warn,
                    "plan_step_skipped",
                    &[("index", &index.to_string()), ("reason", &reason)],
                );
                plan.skipped.push(SkippedStep::new("operation", index, reason));
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::raw::{RawJoin, RawOperation};
    use crate::record::{row_of, SourceSet};
    use serde_json::json;

    fn probe() -> FieldProbe {
        let mut source = SourceSet::new();
        source.push_rows(
            "employees",
            vec![row_of(&[
                ("name", json!("Ada")),
                ("salary", json!(90000)),
                ("dept", json!("eng")),
            ])],
        );
        FieldProbe::from_source(&source)
    }

    fn raw_plan(operations: Vec<RawOperation>, joins: Option<Vec<RawJoin>>) -> RawPlan {
        RawPlan {
            operations,
            joins,
            ..RawPlan::default()
        }
    }

    #[test]
    fn test_valid_steps_survive_in_order() {
        let plan = sanitize_plan(
            &raw_plan(
                vec![
                    RawOperation {
                        kind: "filter".into(),
                        field: Some("salary".into()),
                        condition: Some("gt".into()),
                        value: Some(json!(50000)),
                        table: None,
                    },
                    RawOperation {
                        kind: "sort".into(),
                        field: Some("name".into()),
                        condition: Some("asc".into()),
                        value: None,
                        table: None,
                    },
                ],
                None,
            ),
            &probe(),
        );
        assert_eq!(plan.operations.len(), 2);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_invalid_steps_dropped_not_fatal() {
        let plan = sanitize_plan(
            &raw_plan(
                vec![
                    RawOperation {
                        kind: "explode".into(),
                        ..RawOperation::default()
                    },
                    RawOperation {
                        kind: "filter".into(),
                        field: Some("ghost".into()),
                        condition: Some("eq".into()),
                        value: Some(json!("x")),
                        table: None,
                    },
                    RawOperation {
                        kind: "limit".into(),
                        value: Some(json!(5)),
                        ..RawOperation::default()
                    },
                ],
                None,
            ),
            &probe(),
        );
        assert_eq!(plan.operations.len(), 1);
        assert_eq!(plan.skipped.len(), 2);
        assert!(plan.skipped[0].describe().contains("unrecognized operation"));
        assert!(plan.skipped[1].describe().contains("unknown field"));
    }

    #[test]
    fn test_join_with_bad_field_skipped() {
        let plan = sanitize_plan(
            &raw_plan(
                vec![],
                Some(vec![RawJoin {
                    from_table: "employees".into(),
                    to_table: "depts".into(),
                    from_field: "dept".into(),
                    to_field: "nope".into(),
                    join_type: None,
                }]),
            ),
            &probe(),
        );
        assert!(plan.joins.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].step, "join");
    }

    #[test]
    fn test_string_values_truncated() {
        let long = "x".repeat(MAX_VALUE_LEN + 500);
        let plan = sanitize_plan(
            &raw_plan(
                vec![RawOperation {
                    kind: "filter".into(),
                    field: Some("name".into()),
                    condition: Some("contains".into()),
                    value: Some(json!(long)),
                    table: None,
                }],
                None,
            ),
            &probe(),
        );
        let value = plan.operations[0].value.as_ref().unwrap();
        assert_eq!(value.as_str().unwrap().chars().count(), MAX_VALUE_LEN);
    }

    #[test]
    fn test_non_string_values_untouched() {
        assert_eq!(truncate_value(json!(42)), json!(42));
        assert_eq!(truncate_value(json!([1, 2])), json!([1, 2]));
    }
}
