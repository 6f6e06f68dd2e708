//! Simple linear regression
//!
//! Least-squares slope/intercept with R². The correlation estimate is
//! `sign(slope) * sqrt(|R²|)`, kept exactly as the analytics surface
//! has always reported it (a slope of exactly zero takes the negative
//! branch); do not substitute a direct Pearson computation here.

use serde::Serialize;

/// A fitted line over two numeric fields
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub correlation: f64,
}

impl LinearFit {
    /// Predicted y for a given x
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Display formula, e.g. `y = 1.20 + 0.0450 * x`
    pub fn formula(&self, x_name: &str, y_name: &str) -> String {
        format!(
            "{} = {:.2} + {:.4} * {}",
            y_name, self.intercept, self.slope, x_name
        )
    }
}

/// Fits a least-squares line.
///
/// Returns `None` for fewer than two points, mismatched inputs, or a
/// degenerate denominator (all x equal, or all y equal).
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_total: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    if ss_total == 0.0 {
        return None;
    }
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (b - (slope * a + intercept)).powi(2))
        .sum();
    let r_squared = 1.0 - ss_res / ss_total;

    let correlation = r_squared.abs().sqrt() * if slope > 0.0 { 1.0 } else { -1.0 };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
        correlation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_positive_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!(close(fit.slope, 2.0));
        assert!(close(fit.intercept, 0.0));
        assert!(close(fit.r_squared, 1.0));
        assert!(close(fit.correlation, 1.0));
    }

    #[test]
    fn test_negative_slope_gives_negative_correlation() {
        let x = [1.0, 2.0, 3.0];
        let y = [9.0, 6.0, 3.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!(fit.slope < 0.0);
        assert!(close(fit.correlation, -1.0));
    }

    #[test]
    fn test_prediction() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 3.0, 5.0];
        let fit = linear_fit(&x, &y).unwrap();
        assert!(close(fit.predict(10.0), 21.0));
    }

    #[test]
    fn test_degenerate_inputs_yield_no_fit() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none());
        assert!(linear_fit(&[1.0, 1.0], &[2.0, 3.0]).is_none());
        assert!(linear_fit(&[1.0, 2.0], &[5.0, 5.0]).is_none());
        assert!(linear_fit(&[1.0, 2.0], &[5.0]).is_none());
    }

    #[test]
    fn test_formula_rendering() {
        let fit = LinearFit {
            slope: 0.5,
            intercept: 2.0,
            r_squared: 0.9,
            correlation: 0.94,
        };
        assert_eq!(fit.formula("x", "y"), "y = 2.00 + 0.5000 * x");
    }
}
