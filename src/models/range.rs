//! Reference range model

use std::fmt;

use serde::Serialize;

/// Clinically expected interval for a biomarker value.
///
/// Either bound may be missing for one-sided ranges. When both are `None`
/// the range is unknown. `min <= max` is expected but not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ReferenceRange {
    /// The unknown range `(None, None)`
    pub const UNKNOWN: Self = Self {
        min: None,
        max: None,
    };

    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Two-sided range
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Lower bound only
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    /// Upper bound only
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    /// True when neither bound is set
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<f64>| b.map_or_else(|| "None".to_string(), |v| v.to_string());
        write!(f, "({}, {})", bound(self.min), bound(self.max))
    }
}
