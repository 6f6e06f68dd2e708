//! Request and response envelopes
//!
//! Wire names are camelCase to match what the dashboard consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Row;

/// One collection, its record count, and its inferred field types
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub name: String,
    pub count: usize,
    /// Field name -> advisory type, inferred from a bounded sample
    pub fields: BTreeMap<String, String>,
}

/// Response for the table listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablesResponse {
    pub tables: Vec<TableSummary>,
}

/// A natural-language query submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// The query as typed
    pub query: String,
    /// Tables to query; defaults to every known table
    #[serde(default)]
    pub tables: Vec<String>,
}

/// A completed natural-language query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub natural_query: String,
    pub interpretation: String,
    pub query_type: String,
    pub sql_query: String,
    pub data: Vec<Row>,
    pub record_count: usize,
    pub execution_time_ms: f64,
    /// Descriptions of plan steps dropped by validation
    pub skipped_steps: Vec<String>,
}

/// A pseudo-SQL submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlRequest {
    pub query: String,
}

/// A completed pseudo-SQL statement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlResponse {
    pub success: bool,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub execution_time_ms: f64,
}
