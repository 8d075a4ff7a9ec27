//! Interquartile range outlier rule

use crate::statistics::quantile;
use std::fmt;

/// Whisker length in units of the interquartile range
pub const IQR_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Normal,
    Outlier,
}
impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Normal => write!(f, "Normal"),
            Classification::Outlier => write!(f, "Outlier"),
        }
    }
}

/// Quartiles and outlier thresholds of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}
impl IqrBounds {
    pub fn from_values(data: &[f64]) -> Option<Self> {
        let q1 = quantile(data, 0.25)?;
        let median = quantile(data, 0.5)?;
        let q3 = quantile(data, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            median,
            q3,
            iqr,
            lower: q1 - IQR_FACTOR * iqr,
            upper: q3 + IQR_FACTOR * iqr,
        })
    }
    pub fn classify(&self, value: f64) -> Classification {
        if value < self.lower || value > self.upper {
            Classification::Outlier
        } else {
            Classification::Normal
        }
    }
    pub fn is_outlier(&self, value: f64) -> bool {
        self.classify(value) == Classification::Outlier
    }
    pub fn count_outliers(&self, data: &[f64]) -> usize {
        data.iter().filter(|&&x| self.is_outlier(x)).count()
    }
    /// Range of the data inside the thresholds, the box plot whiskers
    pub fn whiskers(&self, data: &[f64]) -> Option<(f64, f64)> {
        let inside = data.iter().cloned().filter(|&x| !self.is_outlier(x));
        let (lo, hi) = inside.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        if lo <= hi {
            Some((lo, hi))
        } else {
            None
        }
    }
}
