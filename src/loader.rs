//! Lab export loading utilities
//!
//! Reads a CSV export into [`RawRow`]s. Header names come from
//! [`ColumnConfig`] and are matched case-insensitively after trimming. Marker
//! name, draw date and value columns are required; unit, reference range and
//! description are optional.

use std::io;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{ColumnConfig, DashboardConfig};
use crate::diagnostics::DiagnosticSink;
use crate::error::util::safe_open_file;
use crate::error::{BiomarkerError, Result};
use crate::models::{BiomarkerTable, RawRow};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Positions of the configured columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub marker_name: usize,
    pub draw_date: usize,
    pub value: usize,
    pub unit: Option<usize>,
    pub reference_range: Option<usize>,
    pub marker_description: Option<usize>,
}

impl ColumnIndex {
    /// Locate the configured columns in a header record
    pub fn from_headers(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self> {
        let find = |name: &str| {
            let wanted = name.trim();
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        let require = |name: &str| find(name).ok_or_else(|| BiomarkerError::MissingColumn(name.to_string()));

        let index = Self {
            marker_name: require(&columns.marker_name)?,
            draw_date: require(&columns.draw_date)?,
            value: require(&columns.value)?,
            unit: find(&columns.unit),
            reference_range: find(&columns.reference_range),
            marker_description: find(&columns.marker_description),
        };

        if index.unit.is_none() {
            log::warn!("Column '{}' not found, units will be empty", columns.unit);
        }
        if index.reference_range.is_none() {
            log::warn!(
                "Column '{}' not found, all reference ranges will be unknown",
                columns.reference_range
            );
        }

        Ok(index)
    }

    fn row(&self, record: &StringRecord) -> RawRow {
        let cell = |idx: usize| record.get(idx).unwrap_or_default();
        let optional = |idx: Option<usize>| idx.map(cell).unwrap_or_default();

        let mut row = RawRow::new(
            cell(self.marker_name),
            cell(self.draw_date),
            cell(self.value),
            optional(self.unit),
            optional(self.reference_range),
        );
        if let Some(position) = record.position() {
            row = row.with_line(position.line());
        }
        match self.marker_description {
            Some(idx) => row.with_description(cell(idx)),
            None => row,
        }
    }
}

/// Read rows from any CSV source
pub fn read_rows<R: io::Read>(source: R, columns: &ColumnConfig) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let index = ColumnIndex::from_headers(reader.headers()?, columns)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Blank trailing lines in spreadsheet exports
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(index.row(&record));
    }

    Ok(rows)
}

/// Read rows from a CSV file
pub fn load_rows(path: &Path, columns: &ColumnConfig) -> Result<Vec<RawRow>> {
    log_operation_start("Loading lab export from", path);
    let start = Instant::now();

    let file = safe_open_file(path, "loading lab export")?;
    let rows = read_rows(file, columns).inspect_err(|e| {
        log::error!("Failed to read {}: {e}", path.display());
    })?;

    log_operation_complete("loaded", "from", path, rows.len(), Some(start.elapsed()));
    Ok(rows)
}

/// Load a CSV export and aggregate it into a biomarker table
pub fn load_biomarkers<S>(path: &Path, config: &DashboardConfig, sink: &mut S) -> Result<BiomarkerTable>
where
    S: DiagnosticSink + ?Sized,
{
    let rows = load_rows(path, &config.columns)?;
    crate::algorithm::aggregate(&rows, config, sink)
}
