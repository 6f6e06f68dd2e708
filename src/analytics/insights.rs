//! Analysis kinds and insight generation
//!
//! Each summary pairs computed statistics with the short plain-text
//! insights the dashboard lists next to its charts.

use serde::{Deserialize, Serialize};

use crate::interpreter::coerce::{as_number, as_text};
use crate::record::Row;
use crate::stats::{
    compare_groups, high_variability, linear_fit, outlier_indices, Distribution, GroupStats,
    LinearFit,
};

use super::fields::FieldClasses;

/// An analysis applicable to the current collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnalysisKind {
    /// Two numeric fields against each other
    Scatter { x: String, y: String },
    /// Category frequencies of one field
    Distribution { field: String },
    /// A numeric field compared across the groups of a categorical one
    GroupComparison { category: String, value: String },
}

/// Enumerates every analysis the field classes support: scatter for
/// each numeric pair, a distribution per categorical field, and a
/// group comparison per categorical × numeric pair.
pub fn analysis_options(classes: &FieldClasses) -> Vec<AnalysisKind> {
    let mut options = Vec::new();

    for i in 0..classes.numeric.len().saturating_sub(1) {
        for j in (i + 1)..classes.numeric.len() {
            options.push(AnalysisKind::Scatter {
                x: classes.numeric[i].clone(),
                y: classes.numeric[j].clone(),
            });
        }
    }

    for field in &classes.categorical {
        options.push(AnalysisKind::Distribution {
            field: field.clone(),
        });
    }

    for category in &classes.categorical {
        for value in &classes.numeric {
            options.push(AnalysisKind::GroupComparison {
                category: category.clone(),
                value: value.clone(),
            });
        }
    }

    options
}

/// Regression summary for a numeric field pair
#[derive(Debug, Clone, Serialize)]
pub struct ScatterSummary {
    pub fit: LinearFit,
    pub formula: String,
    pub outlier_count: usize,
    pub prediction_x: f64,
    pub prediction_y: f64,
    pub insights: Vec<String>,
}

/// Fits the pair and derives insights; `None` when fewer than two
/// rows have numeric forms for both fields
pub fn scatter_summary(rows: &[Row], x_field: &str, y_field: &str) -> Option<ScatterSummary> {
    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|row| {
            let x = row.get(x_field).and_then(as_number)?;
            let y = row.get(y_field).and_then(as_number)?;
            Some((x, y))
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let x_data: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
    let y_data: Vec<f64> = pairs.iter().map(|(_, y)| *y).collect();
    let fit = linear_fit(&x_data, &y_data)?;

    // Outliers on the dependent variable only
    let outlier_count = outlier_indices(&y_data).len();

    let avg_x = x_data.iter().sum::<f64>() / x_data.len() as f64;
    let prediction_x = avg_x * 1.2;
    let prediction_y = fit.predict(prediction_x);

    let mut insights = Vec::new();
    if fit.correlation.abs() > 0.7 {
        let direction = if fit.correlation > 0.0 {
            "positive"
        } else {
            "negative"
        };
        insights.push(format!("Strong {} correlation detected", direction));
        insights.push(format!("{} is a good predictor of {}", x_field, y_field));
    } else if fit.correlation.abs() > 0.4 {
        insights.push(format!(
            "Moderate correlation - other factors may influence {}",
            y_field
        ));
    } else {
        insights.push(format!(
            "Weak correlation - {} may not directly affect {}",
            x_field, y_field
        ));
    }
    if outlier_count > 0 {
        insights.push(format!(
            "{} outlier(s) detected - may need investigation",
            outlier_count
        ));
    }

    Some(ScatterSummary {
        formula: fit.formula(x_field, y_field),
        fit,
        outlier_count,
        prediction_x,
        prediction_y,
        insights,
    })
}

/// Distribution summary for one categorical field
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub distribution: Distribution,
    pub entropy: f64,
    pub insights: Vec<String>,
}

/// Builds the frequency table over a field's values. Missing and
/// null values count under "Unknown".
pub fn distribution_summary(rows: &[Row], field: &str) -> Option<DistributionSummary> {
    if rows.is_empty() {
        return None;
    }
    let labels = rows.iter().map(|row| match row.get(field) {
        Some(v) if !v.is_null() => as_text(v),
        _ => "Unknown".to_string(),
    });
    let distribution = Distribution::from_labels(labels);
    let entropy = distribution.entropy();

    let mut insights = Vec::new();
    if let Some((label, count)) = distribution.top() {
        let pct = *count as f64 / distribution.total as f64 * 100.0;
        insights.push(format!("Most common: {} ({:.1}%)", label, pct));
    }
    let categories = distribution.category_count();
    if categories > 10 {
        insights.push(format!("High diversity: {} unique categories", categories));
    } else if categories < 3 {
        insights.push(format!("Low diversity: Only {} categories", categories));
    }
    if distribution.is_balanced() {
        insights.push("Balanced distribution across categories".to_string());
    } else {
        insights.push("Skewed distribution - dominated by few categories".to_string());
    }

    Some(DistributionSummary {
        entropy,
        distribution,
        insights,
    })
}

/// Group comparison summary for a categorical × numeric pair
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub groups: Vec<GroupStats>,
    pub high_variability: bool,
    pub insights: Vec<String>,
}

/// Compares the numeric field across the categorical field's groups.
/// Rows whose numeric value fails coercion are excluded.
pub fn group_summary(rows: &[Row], category_field: &str, value_field: &str) -> Option<GroupSummary> {
    let mut grouped: Vec<(String, Vec<f64>)> = Vec::new();
    for row in rows {
        let Some(value) = row.get(value_field).and_then(as_number) else {
            continue;
        };
        let label = match row.get(category_field) {
            Some(v) if !v.is_null() => as_text(v),
            _ => "Unknown".to_string(),
        };
        match grouped.iter_mut().find(|(l, _)| *l == label) {
            Some((_, values)) => values.push(value),
            None => grouped.push((label, vec![value])),
        }
    }

    let stats = compare_groups(&grouped);
    if stats.is_empty() {
        return None;
    }
    let variable = high_variability(&stats);

    let top = &stats[0];
    let bottom = &stats[stats.len() - 1];
    let mut insights = Vec::new();
    insights.push(format!(
        "Highest avg {}: {} ({:.2})",
        value_field, top.label, top.mean
    ));
    insights.push(format!(
        "Lowest avg {}: {} ({:.2})",
        value_field, bottom.label, bottom.mean
    ));
    if bottom.mean != 0.0 {
        let difference = (top.mean - bottom.mean) / bottom.mean * 100.0;
        insights.push(format!(
            "{:.1}% difference between top and bottom groups",
            difference
        ));
    }
    if variable {
        insights.push("High variability within groups - inconsistent patterns".to_string());
    } else {
        insights.push("Low variability - consistent patterns within groups".to_string());
    }

    Some(GroupSummary {
        groups: stats,
        high_variability: variable,
        insights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::row_of;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        vec![
            row_of(&[("dept", json!("eng")), ("hours", json!(10)), ("output", json!(21))]),
            row_of(&[("dept", json!("eng")), ("hours", json!(20)), ("output", json!(41))]),
            row_of(&[("dept", json!("ops")), ("hours", json!(30)), ("output", json!(59))]),
            row_of(&[("dept", json!("ops")), ("hours", json!(40)), ("output", json!(82))]),
        ]
    }

    #[test]
    fn test_analysis_options_enumeration() {
        let classes = FieldClasses {
            numeric: vec!["hours".into(), "output".into()],
            categorical: vec!["dept".into()],
        };
        let options = analysis_options(&classes);
        assert!(options.contains(&AnalysisKind::Scatter {
            x: "hours".into(),
            y: "output".into()
        }));
        assert!(options.contains(&AnalysisKind::Distribution {
            field: "dept".into()
        }));
        // one categorical x two numeric group comparisons
        let comparisons = options
            .iter()
            .filter(|o| matches!(o, AnalysisKind::GroupComparison { .. }))
            .count();
        assert_eq!(comparisons, 2);
    }

    #[test]
    fn test_scatter_summary_strong_correlation() {
        let summary = scatter_summary(&rows(), "hours", "output").unwrap();
        assert!(summary.fit.correlation > 0.7);
        assert!(summary.insights[0].contains("Strong positive correlation"));
        assert!(summary.prediction_x > 0.0);
    }

    #[test]
    fn test_scatter_needs_two_numeric_pairs() {
        let rows = vec![row_of(&[("a", json!(1)), ("b", json!(2))])];
        assert!(scatter_summary(&rows, "a", "b").is_none());
    }

    #[test]
    fn test_distribution_summary() {
        let summary = distribution_summary(&rows(), "dept").unwrap();
        assert_eq!(summary.distribution.category_count(), 2);
        assert!(summary.insights[0].starts_with("Most common:"));
        assert!(summary
            .insights
            .iter()
            .any(|i| i.contains("Low diversity")));
    }

    #[test]
    fn test_group_summary_orders_by_mean() {
        let summary = group_summary(&rows(), "dept", "output").unwrap();
        assert_eq!(summary.groups[0].label, "ops");
        assert!(summary.insights[0].contains("Highest avg output: ops"));
    }

    #[test]
    fn test_group_summary_skips_non_numeric() {
        let rows = vec![
            row_of(&[("dept", json!("eng")), ("v", json!("n/a"))]),
            row_of(&[("dept", json!("eng")), ("v", json!(4))]),
        ];
        let summary = group_summary(&rows, "dept", "v").unwrap();
        assert_eq!(summary.groups[0].count, 1);
    }
}
