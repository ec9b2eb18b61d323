//! Biomarker aggregation
//!
//! Folds raw export rows into a [`BiomarkerTable`] in two passes:
//!
//! 1. Resolve one reference range per marker name. Every row with range text
//!    is parsed and scale-corrected; a later range overwrites an earlier one
//!    and a difference between the two is reported as a conflict.
//! 2. Walk the rows again in input order, creating each biomarker on first
//!    sight with its resolved range and appending `(draw date, value)` to its
//!    history.
//!
//! Rows whose draw date or value cannot be parsed stop the run with
//! [`BiomarkerError::MalformedRow`], carrying the CSV line when the row was
//! loaded from a file.

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::config::DashboardConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{BiomarkerError, Result};
use crate::models::{Biomarker, BiomarkerTable, RawRow, ReferenceRange};
use crate::parse::{ScaleCorrection, normalize_scale, parse_draw_date, parse_reference_range};

/// Resolved reference range per marker name
pub type ResolvedRanges = FxHashMap<String, ReferenceRange>;

/// Builds biomarker tables from raw rows
#[derive(Debug, Clone, Copy)]
pub struct BiomarkerAggregator<'a> {
    config: &'a DashboardConfig,
}

impl<'a> BiomarkerAggregator<'a> {
    #[must_use]
    pub const fn new(config: &'a DashboardConfig) -> Self {
        Self { config }
    }

    /// Resolve the reference range of every marker that has a parseable one.
    ///
    /// Markers whose range text never parses are absent from the result.
    pub fn resolve_reference_ranges<S>(&self, rows: &[RawRow], sink: &mut S) -> ResolvedRanges
    where
        S: DiagnosticSink + ?Sized,
    {
        let mut ranges = ResolvedRanges::default();
        // First non-missing unit per marker, used when a row leaves its unit blank
        let mut units: FxHashMap<String, String> = FxHashMap::default();

        for row in rows.iter().filter(|row| row.has_reference_range()) {
            if let Some(unit) = row.unit() {
                units
                    .entry(row.marker_name.clone())
                    .or_insert_with(|| unit.to_string());
            }

            let parsed = parse_reference_range(&row.reference_range);
            if parsed.is_unknown() {
                sink.report(Diagnostic::RangeParseError {
                    marker: row.marker_name.clone(),
                    draw_date: row.draw_date.clone(),
                    range_text: row.reference_range.trim().to_string(),
                });
                continue;
            }

            let unit = row
                .unit()
                .or_else(|| units.get(&row.marker_name).map(String::as_str))
                .unwrap_or_default();
            let range = match normalize_scale(&row.marker_name, unit, parsed, &self.config.scale_correction) {
                ScaleCorrection::Unchanged(range) => range,
                ScaleCorrection::Corrected { before, after } => {
                    sink.report(Diagnostic::ScaleCorrected {
                        marker: row.marker_name.clone(),
                        unit: unit.to_string(),
                        before,
                        after,
                    });
                    after
                }
            };

            if let Some(previous) = ranges.insert(row.marker_name.clone(), range) {
                if previous != range {
                    sink.report(Diagnostic::RangeConflict {
                        marker: row.marker_name.clone(),
                        draw_date: row.draw_date.clone(),
                        previous,
                        current: range,
                    });
                }
            }
        }

        debug!("Resolved reference ranges for {} markers", ranges.len());
        ranges
    }

    /// Aggregate rows into a biomarker table
    pub fn aggregate<S>(&self, rows: &[RawRow], sink: &mut S) -> Result<BiomarkerTable>
    where
        S: DiagnosticSink + ?Sized,
    {
        let ranges = self.resolve_reference_ranges(rows, sink);
        let mut table = BiomarkerTable::new();

        for (idx, row) in rows.iter().enumerate() {
            let name = row.marker_name.as_str();
            let malformed = |reason: String| BiomarkerError::malformed_row(idx, row.line, name, reason);
            if name.is_empty() {
                return Err(malformed("missing marker name".to_string()));
            }

            let draw_date = parse_draw_date(&row.draw_date, &self.config.dates)
                .ok_or_else(|| malformed(format!("invalid draw date '{}'", row.draw_date)))?;
            let value = parse_value(&row.value)
                .ok_or_else(|| malformed(format!("invalid value '{}'", row.value)))?;

            let (marker, created) = table.upsert(name, || {
                Biomarker::new(
                    name,
                    row.description.clone(),
                    row.unit().unwrap_or_default(),
                    ranges.get(name).copied().unwrap_or_default(),
                )
            });

            if !created {
                if let Some(unit) = row.unit() {
                    if unit != marker.unit {
                        sink.report(Diagnostic::UnitChanged {
                            marker: name.to_string(),
                            draw_date: row.draw_date.clone(),
                            previous: marker.unit.clone(),
                            current: unit.to_string(),
                        });
                        if marker.unit.is_empty() {
                            marker.unit = unit.to_string();
                        }
                    }
                }
                if marker.description.is_none() {
                    marker.description.clone_from(&row.description);
                }
            }

            marker.add_history_entry(draw_date, value);
        }

        info!(
            "Aggregated {} rows into {} biomarkers",
            rows.len(),
            table.len()
        );
        Ok(table)
    }
}

/// Aggregate rows with the given configuration
pub fn aggregate<S>(rows: &[RawRow], config: &DashboardConfig, sink: &mut S) -> Result<BiomarkerTable>
where
    S: DiagnosticSink + ?Sized,
{
    BiomarkerAggregator::new(config).aggregate(rows, sink)
}

/// Parse a measured value; only finite decimals are accepted
fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
