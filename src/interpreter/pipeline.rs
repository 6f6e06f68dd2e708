//! The interpretation pipeline
//!
//! Applies a sanitized plan to a source set. Steps whose execution
//! requirements are not met (a filter without a value, a sort without
//! a field) are silent no-ops; the contract is "always returns a
//! result collection", never "throws".

use crate::plan::{Condition, Operation, OperationKind, SanitizedPlan};
use crate::record::{Row, SourceSet};

use super::filter::RowFilter;
use super::group::{collapse_aggregate, group_counts, group_rows, grouped_aggregate};
use super::join::left_merge;
use super::result::ResultSet;
use super::sort::{RowSorter, SortDirection};
use super::coerce::as_number;

/// Interprets sanitized plans over in-memory collections
pub struct Interpreter;

impl Interpreter {
    /// Runs a plan to completion.
    ///
    /// Deterministic: same sources + same plan = same result. The
    /// sources are never mutated; result rows are always fresh.
    pub fn run(source: &SourceSet, plan: &SanitizedPlan) -> ResultSet {
        // Step 1: Seed from a fresh copy of the anchor collection
        let mut rows: Vec<Row> = source.anchor_rows().to_vec();

        // Step 2: Left-merge each join in order
        for join in &plan.joins {
            rows = left_merge(rows, join, source);
        }

        // Step 3: Apply operations strictly in plan order
        let has_groupby = plan
            .operations
            .iter()
            .any(|op| op.kind == OperationKind::GroupBy);

        for op in &plan.operations {
            rows = Self::apply(rows, op, plan, has_groupby);
        }

        ResultSet {
            rows,
            skipped: plan.skipped.clone(),
        }
    }

    fn apply(
        rows: Vec<Row>,
        op: &Operation,
        plan: &SanitizedPlan,
        has_groupby: bool,
    ) -> Vec<Row> {
        match op.kind {
            OperationKind::Filter => {
                let (Some(field), Some(condition), Some(value)) =
                    (op.field.as_deref(), op.condition, op.value.as_ref())
                else {
                    return rows;
                };
                if value.is_null() {
                    return rows;
                }
                RowFilter::apply(rows, field, condition, value)
            }

            OperationKind::Sort => {
                let Some(field) = op.field.as_deref() else {
                    return rows;
                };
                let mut sorted = rows;
                RowSorter::sort(&mut sorted, field, SortDirection::from_condition(op.condition));
                sorted
            }

            OperationKind::Limit => {
                // No-op when no count can be extracted
                let Some(n) = op.value.as_ref().and_then(as_number) else {
                    return rows;
                };
                let mut limited = rows;
                limited.truncate(n.max(0.0) as usize);
                limited
            }

            OperationKind::GroupBy => {
                let Some(field) = op.field.as_deref() else {
                    return rows;
                };
                let groups = group_rows(&rows, field);

                // Fusion: a co-occurring aggregate with field and
                // condition collapses each group in this one step
                let fused = plan
                    .operations
                    .iter()
                    .find(|other| other.kind == OperationKind::Aggregate);
                match fused {
                    Some(agg) if agg.field.is_some() && agg.condition.is_some() => {
                        grouped_aggregate(
                            groups,
                            field,
                            agg.field.as_deref().unwrap_or_default(),
                            agg.condition.unwrap_or(Condition::Count),
                        )
                    }
                    _ => group_counts(groups, field),
                }
            }

            OperationKind::Aggregate => {
                // Consumed by the groupby fusion when one exists
                if has_groupby {
                    return rows;
                }
                let (Some(field), Some(condition)) = (op.field.as_deref(), op.condition) else {
                    return rows;
                };
                vec![collapse_aggregate(&rows, field, condition)]
            }
        }
    }
}
