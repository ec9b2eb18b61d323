//! A Rust library for turning lab-test exports into per-biomarker value
//! histories, classified against each marker's reference range.

pub mod algorithm;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod models;
pub mod parse;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{
    CategoryLayout, ColumnConfig, DashboardConfig, DateFormatConfig, ScaleCorrectionConfig,
};
pub use error::{BiomarkerError, Result};
pub use models::{Biomarker, BiomarkerTable, HistoryEntry, RawRow, ReferenceRange};

// Parsing and aggregation
pub use algorithm::{BiomarkerAggregator, aggregate};
pub use classify::{RangeStatus, classify};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, NullSink};
pub use parse::{ScaleCorrection, normalize_scale, parse_reference_range};

// Loading and output
pub use loader::{load_biomarkers, load_rows, read_rows};
pub use report::{CategorySummary, ReportSummary};
pub use utils::generate_filename;
