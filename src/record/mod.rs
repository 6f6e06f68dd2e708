//! Record data model
//!
//! Records are schemaless: an identifier plus an opaque JSON object of
//! fields, grouped into named collections by a record-type tag. Field
//! sets and field types are inferred empirically from samples, never
//! declared, so everything downstream coerces defensively.

mod infer;
mod source;
mod types;

pub use infer::{infer_schema, FieldType, SAMPLE_LIMIT};
pub use source::{row_of, FieldProbe, SourceSet};
pub use types::{Row, StoredRecord};
