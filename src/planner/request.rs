//! Planner request construction
//!
//! The request carries just enough context for the planner to ground
//! its plan: up to 15 sample rows per table, the field names of each
//! table's first record, total record counts, and any declared
//! relationships between collections.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::record::StoredRecord;

/// Sample rows sent per table
pub const SAMPLE_ROWS: usize = 15;

/// A declared relationship between two collections
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_schema: String,
    pub target_schema: String,
    pub source_field: String,
    pub target_field: String,
    /// e.g. "one_to_many"
    pub relationship_type: String,
    pub label: Option<String>,
}

/// One query submission to the planner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRequest {
    /// The natural-language query as typed
    pub query: String,
    /// Up to `SAMPLE_ROWS` sample rows per table
    pub tables: BTreeMap<String, Vec<Value>>,
    /// Field names of each table's first record
    pub schemas: BTreeMap<String, Vec<String>>,
    pub is_multi_table: bool,
    pub relationships: Vec<Relationship>,
    /// Total record count per table (the samples are partial)
    pub total_counts: BTreeMap<String, usize>,
}

impl PlannerRequest {
    /// Builds a request from freshly fetched collections, in the order
    /// the user selected them
    pub fn build(
        query: impl Into<String>,
        collections: &[(String, Vec<StoredRecord>)],
        relationships: Vec<Relationship>,
    ) -> Self {
        let mut tables = BTreeMap::new();
        let mut schemas = BTreeMap::new();
        let mut total_counts = BTreeMap::new();

        for (name, records) in collections {
            total_counts.insert(name.clone(), records.len());
            if records.is_empty() {
                continue;
            }
            let samples: Vec<Value> = records
                .iter()
                .take(SAMPLE_ROWS)
                .map(|r| r.data.clone())
                .collect();
            tables.insert(name.clone(), samples);
            schemas.insert(name.clone(), records[0].field_names());
        }

        Self {
            query: query.into(),
            is_multi_table: collections.len() > 1,
            tables,
            schemas,
            relationships,
            total_counts,
        }
    }
}
