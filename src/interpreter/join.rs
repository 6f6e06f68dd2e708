//! Equality left-merge joins
//!
//! Each join merges fields from the first matching candidate row of
//! the target collection into the running result. Equality is exact
//! JSON value equality, no coercion; rows without a match pass
//! through unmerged.

use crate::plan::JoinSpec;
use crate::record::{Row, SourceSet};

/// Applies one join to the running rows
pub fn left_merge(rows: Vec<Row>, join: &JoinSpec, source: &SourceSet) -> Vec<Row> {
    let candidates = source.rows_for(&join.to_table);

    rows.into_iter()
        .map(|row| {
            let matching = candidates
                .iter()
                .find(|candidate| candidate.get(&join.to_field) == row.get(&join.from_field));
            match matching {
                Some(candidate) => {
                    let mut merged = row;
                    // candidate fields overwrite on collision
                    for (key, value) in candidate {
                        merged.insert(key.clone(), value.clone());
                    }
                    merged
                }
                None => row,
            }
        })
        .collect()
}
