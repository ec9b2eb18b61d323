//! Report summary handed to the dashboard renderer.
//!
//! The renderer (HTML pages, plots) lives outside this crate. It receives a
//! JSON document with one entry per biomarker in first-appearance order:
//! metadata, the artifact file name, and every history point already
//! classified and colored. When a [`CategoryLayout`] is attached, the
//! document also lists the category pages with the markers each one shows.

use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::classify::{RangeStatus, classify};
use crate::config::{CategoryLayout, DateFormatConfig};
use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::models::{Biomarker, BiomarkerTable, ReferenceRange};
use crate::parse::format_draw_date;
use crate::utils::generate_filename;
use crate::utils::logging::log_operation_complete;

/// One classified history point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub draw_date: String,
    pub value: f64,
    pub status: RangeStatus,
    pub color: &'static str,
}

/// Everything the renderer needs for one biomarker page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSummary {
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub reference_range: ReferenceRange,
    pub filename: String,
    /// Status of the value with the latest draw date
    pub latest_status: RangeStatus,
    pub history: Vec<HistoryPoint>,
}

impl MarkerSummary {
    #[must_use]
    pub fn from_biomarker(marker: &Biomarker, dates: &DateFormatConfig) -> Self {
        let history = marker
            .history()
            .iter()
            .map(|entry| {
                let status = classify(entry.value, &marker.ref_range);
                HistoryPoint {
                    draw_date: format_draw_date(entry.draw_date, dates),
                    value: entry.value,
                    status,
                    color: status.color(),
                }
            })
            .collect();

        let latest_status = marker
            .most_recent_draw()
            .map_or(RangeStatus::Unknown, |entry| classify(entry.value, &marker.ref_range));

        Self {
            name: marker.name.clone(),
            description: marker.description.clone(),
            unit: marker.unit.clone(),
            reference_range: marker.ref_range,
            filename: generate_filename(&marker.name),
            latest_status,
            history,
        }
    }
}

/// Number of biomarkers per latest status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub in_range: usize,
    pub out_of_range: usize,
    pub unknown: usize,
}

impl StatusCounts {
    fn record(&mut self, status: RangeStatus) {
        match status {
            RangeStatus::InRange => self.in_range += 1,
            RangeStatus::OutOfRange => self.out_of_range += 1,
            RangeStatus::Unknown => self.unknown += 1,
        }
    }
}

/// Markers of one subcategory that are present in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategorySummary {
    pub name: String,
    pub markers: Vec<String>,
}

/// One category page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub filename: String,
    pub subcategories: Vec<SubcategorySummary>,
}

/// Serializable summary of a whole biomarker table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub markers: Vec<MarkerSummary>,
    pub status_counts: StatusCounts,
    /// Category pages in layout order; empty without a layout
    pub categories: Vec<CategorySummary>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_table(table: &BiomarkerTable, dates: &DateFormatConfig) -> Self {
        let markers: Vec<MarkerSummary> = table
            .iter()
            .map(|marker| MarkerSummary::from_biomarker(marker, dates))
            .collect();

        let mut status_counts = StatusCounts::default();
        for marker in &markers {
            status_counts.record(marker.latest_status);
        }

        Self {
            markers,
            status_counts,
            categories: Vec::new(),
        }
    }

    /// Group the summarized markers by a category layout.
    ///
    /// Listed markers absent from the table are left out; subcategories keep
    /// their place even when nothing in them was measured.
    #[must_use]
    pub fn with_categories(mut self, layout: &CategoryLayout) -> Self {
        let present: FxHashSet<&str> = self.markers.iter().map(|m| m.name.as_str()).collect();

        let categories: Vec<CategorySummary> = layout
            .categories
            .iter()
            .map(|category| CategorySummary {
                name: category.name.clone(),
                filename: generate_filename(&category.name),
                subcategories: category
                    .subcategories
                    .iter()
                    .map(|sub| SubcategorySummary {
                        name: sub.name.clone(),
                        markers: sub
                            .markers
                            .iter()
                            .filter(|name| {
                                let found = present.contains(name.as_str());
                                if !found {
                                    debug!("{} / {}: no data for {name}", category.name, sub.name);
                                }
                                found
                            })
                            .cloned()
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let uncategorized = self
            .markers
            .iter()
            .filter(|m| !layout.contains_marker(&m.name))
            .count();
        if uncategorized > 0 {
            info!("{uncategorized} biomarkers are not listed in any category");
        }

        self.categories = categories;
        self
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the summary as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = safe_create_file(path, "writing report summary")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        log_operation_complete("wrote", "to", path, self.markers.len(), None);
        Ok(())
    }
}
