//! IQR outlier detection
//!
//! Quartiles are taken at the 25th/75th percentile *index* of the
//! sorted values (`floor(n * 0.25)` / `floor(n * 0.75)`), with no
//! interpolation. Bounds are the usual 1.5·IQR fences.

use serde::Serialize;

/// Quartiles and fences for one variable
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// True when a value falls outside the fences
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Computes IQR bounds; `None` for an empty input
pub fn iqr_bounds(values: &[f64]) -> Option<IqrBounds> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = sorted[(sorted.len() as f64 * 0.25) as usize];
    let q3 = sorted[(sorted.len() as f64 * 0.75) as usize];
    let iqr = q3 - q1;

    Some(IqrBounds {
        q1,
        q3,
        iqr,
        lower: q1 - 1.5 * iqr,
        upper: q3 + 1.5 * iqr,
    })
}

/// Indices of outlying values, judged on the dependent variable only
pub fn outlier_indices(values: &[f64]) -> Vec<usize> {
    let Some(bounds) = iqr_bounds(values) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| bounds.is_outlier(**v))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_use_floor_index() {
        // 8 values: q1 index = floor(8*0.25) = 2, q3 index = 6
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bounds = iqr_bounds(&values).unwrap();
        assert_eq!(bounds.q1, 3.0);
        assert_eq!(bounds.q3, 7.0);
        assert_eq!(bounds.iqr, 4.0);
    }

    #[test]
    fn test_fences() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bounds = iqr_bounds(&values).unwrap();
        assert_eq!(bounds.lower, -3.0);
        assert_eq!(bounds.upper, 13.0);
    }

    #[test]
    fn test_detects_extreme_value() {
        let values = [10.0, 11.0, 12.0, 11.0, 10.0, 12.0, 11.0, 200.0];
        let indices = outlier_indices(&values);
        assert_eq!(indices, vec![7]);
    }

    #[test]
    fn test_no_outliers_in_tight_cluster() {
        let values = [5.0, 5.1, 4.9, 5.0, 5.2];
        assert!(outlier_indices(&values).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(iqr_bounds(&[]).is_none());
        assert!(outlier_indices(&[]).is_empty());
    }
}
