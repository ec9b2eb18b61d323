//! x1000 unit-scale correction
//!
//! Handles one specific transcription error: a count reported in thousands
//! (unit contains `x10E3`) whose reference range was written in absolute
//! counts. This is intentionally not a general unit conversion.

use crate::config::ScaleCorrectionConfig;
use crate::models::range::ReferenceRange;

/// Outcome of checking a parsed range against its unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleCorrection {
    Unchanged(ReferenceRange),
    Corrected {
        before: ReferenceRange,
        after: ReferenceRange,
    },
}

impl ScaleCorrection {
    /// The range to use from here on
    #[must_use]
    pub const fn range(&self) -> ReferenceRange {
        match self {
            Self::Unchanged(range) => *range,
            Self::Corrected { after, .. } => *after,
        }
    }

    #[must_use]
    pub const fn is_corrected(&self) -> bool {
        matches!(self, Self::Corrected { .. })
    }
}

/// Divide a range down to the per-thousand scale when the unit calls for it.
///
/// The correction applies when all of these hold:
/// - the unit contains `config.unit_marker`
/// - the marker is not exempt
/// - the upper bound is at least `config.threshold`
#[must_use]
pub fn normalize_scale(
    marker_name: &str,
    unit: &str,
    range: ReferenceRange,
    config: &ScaleCorrectionConfig,
) -> ScaleCorrection {
    if !config.enabled || config.unit_marker.is_empty() || !unit.contains(&config.unit_marker) {
        return ScaleCorrection::Unchanged(range);
    }
    if config.is_exempt(marker_name) {
        return ScaleCorrection::Unchanged(range);
    }

    match range.max {
        Some(max) if max >= config.threshold => {
            let after = ReferenceRange::new(range.min.map(|min| min / config.factor), Some(max / config.factor));
            ScaleCorrection::Corrected {
                before: range,
                after,
            }
        }
        _ => ScaleCorrection::Unchanged(range),
    }
}
