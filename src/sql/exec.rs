//! Pseudo-SQL execution
//!
//! SELECTs flatten records for display (id and record_type alongside
//! the data fields), then reuse the interpreter's sorter. Writes are
//! deliberately narrow: INSERT stores the raw statement under a marker
//! type, UPDATE touches timestamps, DELETE removes by ID.

use serde_json::{json, Value};

use crate::interpreter::{RowSorter, SortDirection};
use crate::record::{Row, StoredRecord};
use crate::store::RecordStore;

use super::errors::SqlResult;
use super::statement::{SelectStatement, SqlStatement, DEFAULT_TABLE};

/// Result of executing one statement
#[derive(Debug, Clone)]
pub enum SqlOutcome {
    /// SELECT result rows
    Rows(Vec<Row>),
    /// Write acknowledgement
    Affected {
        operation: &'static str,
        rows: usize,
        message: String,
    },
}

/// Executes a parsed statement against the store
pub fn execute(store: &dyn RecordStore, statement: &SqlStatement) -> SqlResult<SqlOutcome> {
    match statement {
        SqlStatement::Select(select) => Ok(SqlOutcome::Rows(run_select(store, select)?)),

        SqlStatement::Insert { raw } => {
            store.insert(
                "manual_sql",
                json!({
                    "raw_query": raw,
                    "inserted_via": "SQL Interface",
                }),
            )?;
            Ok(SqlOutcome::Affected {
                operation: "INSERT",
                rows: 1,
                message: "Record inserted successfully".into(),
            })
        }

        SqlStatement::Update { id } => {
            // Re-store the existing data; the store bumps updated_at
            let existing = store.get(id)?;
            store.update(id, existing.data)?;
            Ok(SqlOutcome::Affected {
                operation: "UPDATE",
                rows: 1,
                message: "Record updated successfully".into(),
            })
        }

        SqlStatement::Delete { id } => {
            store.delete(id)?;
            Ok(SqlOutcome::Affected {
                operation: "DELETE",
                rows: 1,
                message: "Record deleted successfully".into(),
            })
        }
    }
}

fn run_select(store: &dyn RecordStore, select: &SelectStatement) -> SqlResult<Vec<Row>> {
    let records = if select.table == DEFAULT_TABLE {
        store.fetch_all()?
    } else {
        store.fetch(&select.table)?
    };

    let mut rows: Vec<Row> = records.iter().map(flatten_record).collect();

    if let Some(order) = &select.order {
        let direction = if order.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        RowSorter::sort(&mut rows, &order.field, direction);
    }

    rows.truncate(select.limit);
    Ok(rows)
}

/// Flattens a record for display: id and record_type alongside the
/// data fields, plus the creation timestamp
fn flatten_record(record: &StoredRecord) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), Value::String(record.id.clone()));
    row.insert(
        "record_type".to_string(),
        Value::String(record.record_type.clone()),
    );
    if let Some(data) = record.data.as_object() {
        for (key, value) in data {
            row.insert(key.clone(), value.clone());
        }
    }
    row.insert(
        "created_at".to_string(),
        Value::String(record.created_at.to_rfc3339()),
    );
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert("students", json!({"name": "Ada", "gpa": 3.9})).unwrap();
        store.insert("students", json!({"name": "Bo", "gpa": 3.2})).unwrap();
        store.insert("courses", json!({"code": "CS101"})).unwrap();
        store
    }

    fn parse_and_run(store: &MemoryStore, query: &str) -> SqlOutcome {
        let statement = SqlStatement::parse(query).unwrap();
        execute(store, &statement).unwrap()
    }

    #[test]
    fn test_select_from_named_table() {
        let outcome = parse_and_run(&seeded_store(), "SELECT * FROM students");
        let SqlOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("record_type"), Some(&json!("students")));
        assert!(rows[0].contains_key("id"));
        assert!(rows[0].contains_key("created_at"));
    }

    #[test]
    fn test_select_default_table_spans_all_records() {
        let outcome = parse_and_run(&seeded_store(), "SELECT * FROM data_records");
        let SqlOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_select_order_and_limit() {
        let outcome = parse_and_run(
            &seeded_store(),
            "SELECT * FROM students ORDER BY gpa DESC LIMIT 1",
        );
        let SqlOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_update_touches_record() {
        let store = seeded_store();
        let id = store.fetch("students").unwrap()[0].id.clone();
        let outcome = parse_and_run(&store, &format!("UPDATE t SET x = 1 WHERE id = '{}'", id));
        assert!(matches!(
            outcome,
            SqlOutcome::Affected {
                operation: "UPDATE",
                rows: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_delete_removes_record() {
        let store = seeded_store();
        let id = store.fetch("courses").unwrap()[0].id.clone();
        parse_and_run(&store, &format!("DELETE FROM courses WHERE id = '{}'", id));
        assert!(store.fetch("courses").unwrap().is_empty());
    }

    #[test]
    fn test_insert_stores_marker_record() {
        let store = seeded_store();
        parse_and_run(&store, "INSERT INTO t (a) VALUES (1)");
        let records = store.fetch("manual_sql").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].data.get("raw_query").is_some());
    }
}
