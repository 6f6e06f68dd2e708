//! Analytics over record collections
//!
//! Classifies fields into numeric and categorical by sampling, works
//! out which analyses apply, and produces summaries plus plain-text
//! insights. Chart rendering itself lives in the dashboard; this
//! module only prepares the numbers.

mod fields;
mod insights;

pub use fields::{classify_fields, FieldClasses};
pub use insights::{
    analysis_options, distribution_summary, group_summary, scatter_summary, AnalysisKind,
    DistributionSummary, GroupSummary, ScatterSummary,
};
