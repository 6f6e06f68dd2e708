//! Plan sanitization invariants
//!
//! A plan from the planner is adversarial input: only recognized
//! kinds, recognized conditions, and probed fields survive, string
//! values are bounded, and nothing ever aborts the submission.

use querydeck::plan::{sanitize_plan, RawJoin, RawOperation, RawPlan, MAX_VALUE_LEN};
use querydeck::record::{row_of, FieldProbe, SourceSet};
use serde_json::json;

fn probe() -> FieldProbe {
    let mut source = SourceSet::new();
    source.push_rows(
        "inventory",
        vec![row_of(&[
            ("sku", json!("X-1")),
            ("qty", json!(4)),
            ("warehouse", json!("east")),
        ])],
    );
    FieldProbe::from_source(&source)
}

fn filter(field: &str, condition: &str, value: serde_json::Value) -> RawOperation {
    RawOperation {
        kind: "filter".into(),
        table: None,
        field: Some(field.into()),
        condition: Some(condition.into()),
        value: Some(value),
    }
}

#[test]
fn hostile_plan_degrades_to_empty_plan() {
    let raw = RawPlan {
        operations: vec![
            RawOperation {
                kind: "drop_table".into(),
                ..RawOperation::default()
            },
            RawOperation {
                kind: "filter".into(),
                field: Some("password".into()),
                condition: Some("eq".into()),
                value: Some(json!("hunter2")),
                table: None,
            },
            filter("qty", "regex_bomb", json!(".*")),
        ],
        joins: Some(vec![RawJoin {
            from_table: "inventory".into(),
            to_table: "users".into(),
            from_field: "qty".into(),
            to_field: "secret".into(),
            join_type: None,
        }]),
        ..RawPlan::default()
    };

    let plan = sanitize_plan(&raw, &probe());
    assert!(plan.is_empty());
    assert_eq!(plan.skipped.len(), 4);
}

#[test]
fn skip_reasons_name_the_problem() {
    let raw = RawPlan {
        operations: vec![
            RawOperation {
                kind: "explode".into(),
                ..RawOperation::default()
            },
            filter("qty", "like", json!("4")),
            filter("ghost", "eq", json!("x")),
        ],
        ..RawPlan::default()
    };
    let plan = sanitize_plan(&raw, &probe());

    let reasons: Vec<String> = plan.skipped.iter().map(|s| s.describe()).collect();
    assert!(reasons[0].contains("unrecognized operation: explode"));
    assert!(reasons[1].contains("unrecognized condition: like"));
    assert!(reasons[2].contains("unknown field: ghost"));
}

#[test]
fn oversized_string_values_are_bounded() {
    let huge = "A".repeat(50_000);
    let raw = RawPlan {
        operations: vec![filter("sku", "contains", json!(huge))],
        ..RawPlan::default()
    };
    let plan = sanitize_plan(&raw, &probe());

    let kept = plan.operations[0].value.as_ref().unwrap();
    assert_eq!(kept.as_str().unwrap().len(), MAX_VALUE_LEN);
}

#[test]
fn valid_steps_keep_relative_order_around_dropped_ones() {
    let raw = RawPlan {
        operations: vec![
            filter("qty", "gte", json!(1)),
            RawOperation {
                kind: "nonsense".into(),
                ..RawOperation::default()
            },
            RawOperation {
                kind: "sort".into(),
                field: Some("sku".into()),
                condition: Some("asc".into()),
                value: None,
                table: None,
            },
            RawOperation {
                kind: "limit".into(),
                value: Some(json!(10)),
                ..RawOperation::default()
            },
        ],
        ..RawPlan::default()
    };
    let plan = sanitize_plan(&raw, &probe());

    let kinds: Vec<&str> = plan
        .operations
        .iter()
        .map(|op| op.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["filter", "sort", "limit"]);
}

#[test]
fn join_survives_when_both_fields_probe() {
    let raw = RawPlan {
        joins: Some(vec![RawJoin {
            from_table: "inventory".into(),
            to_table: "inventory".into(),
            from_field: "sku".into(),
            to_field: "warehouse".into(),
            join_type: Some("LEFT".into()),
        }]),
        ..RawPlan::default()
    };
    let plan = sanitize_plan(&raw, &probe());
    assert_eq!(plan.joins.len(), 1);
    assert!(plan.skipped.is_empty());
}
