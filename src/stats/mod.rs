//! Statistical helpers
//!
//! Pure numeric functions over already-loaded in-memory sequences,
//! shared by the analytics and reporting surfaces. No I/O, no
//! concurrency concerns.

mod distribution;
mod groups;
mod outliers;
mod regression;

pub use distribution::Distribution;
pub use groups::{compare_groups, high_variability, GroupStats};
pub use outliers::{iqr_bounds, outlier_indices, IqrBounds};
pub use regression::{linear_fit, LinearFit};
