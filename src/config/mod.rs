//! Configuration for biomarker loading and aggregation.
//!
//! Column header names, accepted draw-date formats and the x1000 unit-scale
//! correction are all injectable here rather than hard-coded in the parsers.
//! Every section can be overridden from a TOML file; missing keys keep their
//! defaults. The optional category layout is a separate YAML document, see
//! [`categories`].

pub mod categories;

use std::path::Path;

use serde::Deserialize;

use crate::error::util::safe_read_to_string;
use crate::error::{BiomarkerError, Result};

pub use categories::{Category, CategoryLayout, Subcategory};

/// Header names of the lab export
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub marker_name: String,
    pub draw_date: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub marker_description: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            marker_name: "Marker Name".to_string(),
            draw_date: "Draw Date".to_string(),
            value: "Value".to_string(),
            unit: "Units".to_string(),
            reference_range: "Reference Range".to_string(),
            marker_description: "Marker Description".to_string(),
        }
    }
}

/// Configuration for draw date parsing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// `chrono` format strings tried in order
    pub date_formats: Vec<String>,
    /// Format used when writing dates into the report summary
    pub output_format: String,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%m/%d/%y".to_string(), // Lab export: 01/15/23
            ],
            output_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Settings for the x1000 unit-scale correction.
///
/// Some exports report counts in thousands (`x10E3/uL`) while the reference
/// range was transcribed in absolute counts. A range whose upper bound
/// reaches `threshold` under such a unit is divided by `factor`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScaleCorrectionConfig {
    pub enabled: bool,
    /// Substring of the unit that marks a per-thousand scale
    pub unit_marker: String,
    /// Markers that are never corrected, compared after trimming
    pub exempt_markers: Vec<String>,
    pub threshold: f64,
    pub factor: f64,
}

impl Default for ScaleCorrectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            unit_marker: "x10E3".to_string(),
            // Platelet ranges are already given in thousands
            exempt_markers: vec!["Platelets".to_string()],
            threshold: 100.0,
            factor: 1000.0,
        }
    }
}

impl ScaleCorrectionConfig {
    /// Check whether a marker is on the exemption list
    #[must_use]
    pub fn is_exempt(&self, marker_name: &str) -> bool {
        let name = marker_name.trim();
        self.exempt_markers.iter().any(|m| m.trim() == name)
    }
}

/// Top-level configuration for a dashboard run
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ColumnConfig,
    pub dates: DateFormatConfig,
    pub scale_correction: ScaleCorrectionConfig,
}

impl DashboardConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BiomarkerError::Config(format!("Parse TOML failed: {e}")))
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "dashboard configuration")?;
        Self::from_toml_str(&content)
            .map_err(|e| e.context(format!("Config file: {}", path.display())))
    }

    /// Replace the column header names
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnConfig) -> Self {
        self.columns = columns;
        self
    }

    /// Replace the accepted draw date formats
    #[must_use]
    pub fn with_date_formats(mut self, formats: &[&str]) -> Self {
        self.dates.date_formats = formats.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Add a marker to the x1000 correction exemption list
    #[must_use]
    pub fn with_scale_exemption(mut self, marker_name: &str) -> Self {
        self.scale_correction
            .exempt_markers
            .push(marker_name.trim().to_string());
        self
    }

    /// Turn the x1000 correction off entirely
    #[must_use]
    pub fn without_scale_correction(mut self) -> Self {
        self.scale_correction.enabled = false;
        self
    }
}
