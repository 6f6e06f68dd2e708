//! Validated plan steps
//!
//! Tagged variants with validating constructors: parsing an untrusted
//! step either yields a recognized operation or a reason it was
//! dropped. Nothing here executes anything.

use serde_json::Value;

use crate::record::FieldProbe;

use super::raw::{RawJoin, RawOperation};
use super::sanitize::truncate_value;

/// Recognized operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Filter,
    Sort,
    Aggregate,
    GroupBy,
    Limit,
}

impl OperationKind {
    /// Parses a kind symbol; unknown symbols yield `None`
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "filter" => Some(OperationKind::Filter),
            "sort" => Some(OperationKind::Sort),
            "aggregate" => Some(OperationKind::Aggregate),
            "groupby" => Some(OperationKind::GroupBy),
            "limit" => Some(OperationKind::Limit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Filter => "filter",
            OperationKind::Sort => "sort",
            OperationKind::Aggregate => "aggregate",
            OperationKind::GroupBy => "groupby",
            OperationKind::Limit => "limit",
        }
    }
}

/// Recognized condition symbols: comparators, aggregators, and sort
/// directions share one namespace on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Neq,
    Contains,
    StartsWith,
    EndsWith,
    Avg,
    Sum,
    Max,
    Min,
    Count,
    Asc,
    Desc,
}

impl Condition {
    /// Parses a condition symbol; unknown symbols yield `None`
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            "gt" => Some(Condition::Gt),
            "lt" => Some(Condition::Lt),
            "gte" => Some(Condition::Gte),
            "lte" => Some(Condition::Lte),
            "eq" => Some(Condition::Eq),
            "neq" => Some(Condition::Neq),
            "contains" => Some(Condition::Contains),
            "startswith" => Some(Condition::StartsWith),
            "endswith" => Some(Condition::EndsWith),
            "avg" => Some(Condition::Avg),
            "sum" => Some(Condition::Sum),
            "max" => Some(Condition::Max),
            "min" => Some(Condition::Min),
            "count" => Some(Condition::Count),
            "asc" => Some(Condition::Asc),
            "desc" => Some(Condition::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Gt => "gt",
            Condition::Lt => "lt",
            Condition::Gte => "gte",
            Condition::Lte => "lte",
            Condition::Eq => "eq",
            Condition::Neq => "neq",
            Condition::Contains => "contains",
            Condition::StartsWith => "startswith",
            Condition::EndsWith => "endswith",
            Condition::Avg => "avg",
            Condition::Sum => "sum",
            Condition::Max => "max",
            Condition::Min => "min",
            Condition::Count => "count",
            Condition::Asc => "asc",
            Condition::Desc => "desc",
        }
    }

    /// True for row-comparison conditions
    pub fn is_comparator(&self) -> bool {
        matches!(
            self,
            Condition::Gt
                | Condition::Lt
                | Condition::Gte
                | Condition::Lte
                | Condition::Eq
                | Condition::Neq
                | Condition::Contains
                | Condition::StartsWith
                | Condition::EndsWith
        )
    }

    /// True for aggregation conditions
    pub fn is_aggregator(&self) -> bool {
        matches!(
            self,
            Condition::Avg | Condition::Sum | Condition::Max | Condition::Min | Condition::Count
        )
    }

    /// Output label for a standalone aggregate row
    pub fn aggregate_label(&self) -> Option<&'static str> {
        match self {
            Condition::Avg => Some("average"),
            Condition::Sum => Some("total"),
            Condition::Max => Some("maximum"),
            Condition::Min => Some("minimum"),
            Condition::Count => Some("count"),
            _ => None,
        }
    }
}

/// A validated plan step, ready for the interpreter
#[derive(Debug, Clone)]
pub struct Operation {
    pub kind: OperationKind,
    pub field: Option<String>,
    pub condition: Option<Condition>,
    pub value: Option<Value>,
}

impl Operation {
    /// Validates a raw step against the recognized sets and the field
    /// probe. Returns the reason the step must be dropped otherwise.
    pub fn from_raw(raw: &RawOperation, probe: &FieldProbe) -> Result<Self, String> {
        let kind = OperationKind::parse(&raw.kind)
            .ok_or_else(|| format!("unrecognized operation: {}", raw.kind))?;

        let condition = match raw.condition.as_deref() {
            None => None,
            Some(symbol) => Some(
                Condition::parse(symbol)
                    .ok_or_else(|| format!("unrecognized condition: {}", symbol))?,
            ),
        };

        if let Some(field) = raw.field.as_deref() {
            if !probe.contains(field) {
                return Err(format!("unknown field: {}", field));
            }
        }

        Ok(Self {
            kind,
            field: raw.field.clone(),
            condition,
            value: raw.value.clone().map(truncate_value),
        })
    }
}

/// A validated equality join step
#[derive(Debug, Clone)]
pub struct JoinSpec {
    pub from_table: String,
    pub to_table: String,
    pub from_field: String,
    pub to_field: String,
}

impl JoinSpec {
    /// Validates a raw join: both fields must independently pass the
    /// field probe. Table names are not checked here; an unknown
    /// target table simply yields an empty candidate set later.
    pub fn from_raw(raw: &RawJoin, probe: &FieldProbe) -> Result<Self, String> {
        if !probe.contains(&raw.from_field) || !probe.contains(&raw.to_field) {
            return Err(format!(
                "invalid join fields: {} -> {}",
                raw.from_field, raw.to_field
            ));
        }
        Ok(Self {
            from_table: raw.from_table.clone(),
            to_table: raw.to_table.clone(),
            from_field: raw.from_field.clone(),
            to_field: raw.to_field.clone(),
        })
    }
}
