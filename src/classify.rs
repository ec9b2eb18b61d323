//! Value classification against a reference range

use std::fmt;

use serde::Serialize;

use crate::models::range::ReferenceRange;

/// Point color for values inside the reference range
pub const COLOR_GREEN: &str = "rgb(82, 182, 2)";
/// Point color for values outside the reference range
pub const COLOR_RED: &str = "rgb(236, 2, 0)";
/// Point color when the range is unknown
pub const COLOR_NEUTRAL: &str = "grey";

/// Where a value falls relative to its marker's reference range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    InRange,
    OutOfRange,
    Unknown,
}

impl RangeStatus {
    /// Display color used by the renderer
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::InRange => COLOR_GREEN,
            Self::OutOfRange => COLOR_RED,
            Self::Unknown => COLOR_NEUTRAL,
        }
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InRange => "in range",
            Self::OutOfRange => "out of range",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Classify a single value against a range. Bounds are inclusive.
#[must_use]
pub fn classify(value: f64, range: &ReferenceRange) -> RangeStatus {
    let in_range = match (range.min, range.max) {
        (Some(min), Some(max)) => min <= value && value <= max,
        (Some(min), None) => value >= min,
        (None, Some(max)) => value <= max,
        (None, None) => return RangeStatus::Unknown,
    };

    if in_range {
        RangeStatus::InRange
    } else {
        RangeStatus::OutOfRange
    }
}
