//! Per-group comparison statistics
//!
//! Mean, median (middle element of the sorted values, no even-length
//! averaging), and population standard deviation for each group,
//! ordered by mean descending.

use serde::Serialize;

/// Summary statistics for one group
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub label: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// Computes per-group statistics, sorted by mean descending.
/// Groups with no values are dropped.
pub fn compare_groups(groups: &[(String, Vec<f64>)]) -> Vec<GroupStats> {
    let mut stats: Vec<GroupStats> = groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;

            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let median = sorted[sorted.len() / 2];

            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            GroupStats {
                label: label.clone(),
                mean,
                median,
                std_dev: variance.sqrt(),
                count: values.len(),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    stats
}

/// True when the average per-group standard deviation exceeds 30% of
/// the top group's mean
pub fn high_variability(stats: &[GroupStats]) -> bool {
    let Some(top) = stats.first() else {
        return false;
    };
    let avg_std_dev = stats.iter().map(|s| s.std_dev).sum::<f64>() / stats.len() as f64;
    avg_std_dev > top.mean * 0.3
}
