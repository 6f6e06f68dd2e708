//! Field classification
//!
//! A field is numeric when every sampled non-null value has a numeric
//! form; otherwise categorical. Fields with no non-null sample are
//! skipped entirely.

use crate::interpreter::coerce::as_number;
use crate::record::Row;

/// Sample size per field
const SAMPLE_ROWS: usize = 10;

/// Fields split by inferred class
#[derive(Debug, Clone, Default)]
pub struct FieldClasses {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// Classifies the given fields by sampling the first rows
pub fn classify_fields(schema: &[String], rows: &[Row]) -> FieldClasses {
    let mut classes = FieldClasses::default();

    for field in schema {
        let samples: Vec<_> = rows
            .iter()
            .take(SAMPLE_ROWS)
            .filter_map(|row| row.get(field))
            .filter(|v| !v.is_null())
            .collect();
        if samples.is_empty() {
            continue;
        }

        let numeric = samples.iter().all(|v| as_number(v).is_some());
        if numeric {
            classes.numeric.push(field.clone());
        } else {
            classes.categorical.push(field.clone());
        }
    }

    classes
}
