//! Logging utilities
//!
//! Standardized messages for file-level operations and run summaries.

use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use crate::classify::{RangeStatus, classify};
use crate::models::BiomarkerTable;

/// Log an operation start with consistent format
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Past-tense description of the operation
/// * `preposition` - Relation of the items to the path (`from`, `to`)
/// * `path` - Path of the file that was operated on
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    preposition: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    log::info!("{}", completion_message(operation, preposition, path, items, elapsed));
}

fn completion_message(
    operation: &str,
    preposition: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) -> String {
    let message = format!(
        "Successfully {} {} items {} {}",
        operation,
        items,
        preposition,
        path.display()
    );
    match elapsed {
        Some(duration) => format!("{message} in {duration:?}"),
        None => message,
    }
}

/// Log one line per biomarker with its latest value and status
pub fn log_table_summary(table: &BiomarkerTable) {
    for marker in table {
        let Some(latest) = marker.most_recent_draw() else {
            continue;
        };
        let status = classify(latest.value, &marker.ref_range);
        log::debug!(
            "{}: {} {} on {} ({}, {} draws)",
            marker.name,
            latest.value,
            marker.unit,
            latest.draw_date,
            status,
            marker.history().len()
        );
    }

    let counts = table
        .iter()
        .filter_map(|m| m.most_recent_draw().map(|e| classify(e.value, &m.ref_range)))
        .counts();
    let summary = [RangeStatus::InRange, RangeStatus::OutOfRange, RangeStatus::Unknown]
        .iter()
        .map(|status| format!("{}: {}", status, counts.get(status).copied().unwrap_or(0)))
        .join(", ");
    log::info!("{} biomarkers by latest value - {summary}", table.len());
}
