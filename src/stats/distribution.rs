//! Categorical distributions
//!
//! Frequency table plus Shannon entropy. A distribution counts as
//! balanced when its entropy exceeds 80% of the maximum possible for
//! its category count.

use serde::Serialize;

/// A frequency table over category labels, sorted by count descending
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub entries: Vec<(String, usize)>,
    pub total: usize,
}

impl Distribution {
    /// Builds a distribution from category labels
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut total = 0;
        for label in labels {
            total += 1;
            match entries.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => entries.push((label, 1)),
            }
        }
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries, total }
    }

    /// Number of distinct categories
    pub fn category_count(&self) -> usize {
        self.entries.len()
    }

    /// Most frequent category, if any
    pub fn top(&self) -> Option<&(String, usize)> {
        self.entries.first()
    }

    /// Shannon entropy in bits: `-Σ p·log2 p`
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.entries
            .iter()
            .map(|(_, count)| {
                let p = *count as f64 / self.total as f64;
                -p * p.log2()
            })
            .sum()
    }

    /// True when entropy exceeds 0.8 × log2(category count)
    pub fn is_balanced(&self) -> bool {
        let k = self.category_count();
        if k == 0 {
            return false;
        }
        self.entropy() > (k as f64).log2() * 0.8
    }
}
