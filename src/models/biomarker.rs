//! Biomarker model
//!
//! A biomarker holds the metadata of one named lab marker together with its
//! time series of observed values.

use chrono::NaiveDate;

use crate::models::range::ReferenceRange;

/// One observation in a biomarker's history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub draw_date: NaiveDate,
    pub value: f64,
}

/// A named lab marker and its value history
#[derive(Debug, Clone, PartialEq)]
pub struct Biomarker {
    /// Marker name, unique within a table
    pub name: String,
    pub description: Option<String>,
    /// First-seen unit; empty when no row has reported one yet
    pub unit: String,
    pub ref_range: ReferenceRange,
    /// Entries in input row order, not necessarily date order
    history: Vec<HistoryEntry>,
}

impl Biomarker {
    /// Create a biomarker with an empty history
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        unit: impl Into<String>,
        ref_range: ReferenceRange,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            unit: unit.into(),
            ref_range,
            history: Vec::new(),
        }
    }

    /// Append a single history entry
    pub fn add_history_entry(&mut self, draw_date: NaiveDate, value: f64) {
        self.history.push(HistoryEntry { draw_date, value });
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Most recently inserted entry
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    /// Entry with the latest draw date, ties resolved by insertion order
    #[must_use]
    pub fn most_recent_draw(&self) -> Option<&HistoryEntry> {
        self.history.iter().max_by_key(|entry| entry.draw_date)
    }
}
