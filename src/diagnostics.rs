//! Diagnostics raised while aggregating a lab export.
//!
//! The aggregator reports recoverable problems through a [`DiagnosticSink`]
//! it is handed, instead of writing to a global channel. Production runs use
//! [`LogSink`]; tests use [`CollectingSink`] to inspect what was reported.

use std::fmt;

use crate::models::range::ReferenceRange;

/// A recoverable event noticed during aggregation
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Non-empty reference range text matched no known shape
    RangeParseError {
        marker: String,
        draw_date: String,
        range_text: String,
    },
    /// A later row carried a different reference range; the later one wins
    RangeConflict {
        marker: String,
        draw_date: String,
        previous: ReferenceRange,
        current: ReferenceRange,
    },
    /// The x1000 scale correction rewrote a range
    ScaleCorrected {
        marker: String,
        unit: String,
        before: ReferenceRange,
        after: ReferenceRange,
    },
    /// A later row reported a different unit; history values are kept as is
    UnitChanged {
        marker: String,
        draw_date: String,
        previous: String,
        current: String,
    },
}

/// Severity used when forwarding a diagnostic to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Diagnostic {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::RangeParseError { .. } => Severity::Error,
            Self::RangeConflict { .. } | Self::ScaleCorrected { .. } | Self::UnitChanged { .. } => {
                Severity::Warning
            }
        }
    }

    /// Name of the marker the diagnostic concerns
    #[must_use]
    pub fn marker(&self) -> &str {
        match self {
            Self::RangeParseError { marker, .. }
            | Self::RangeConflict { marker, .. }
            | Self::ScaleCorrected { marker, .. }
            | Self::UnitChanged { marker, .. } => marker,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeParseError {
                marker,
                draw_date,
                range_text,
            } => write!(
                f,
                "Could not parse reference range '{range_text}' for {marker} on {draw_date}"
            ),
            Self::RangeConflict {
                marker,
                draw_date,
                previous,
                current,
            } => write!(
                f,
                "Reference range for {marker} changed on {draw_date}: {previous} -> {current}"
            ),
            Self::ScaleCorrected {
                marker,
                unit,
                before,
                after,
            } => write!(
                f,
                "Rescaled reference range for {marker} ({unit}): {before} -> {after}"
            ),
            Self::UnitChanged {
                marker,
                draw_date,
                previous,
                current,
            } => write!(
                f,
                "Unit for {marker} changed on {draw_date} from '{previous}' to '{current}'"
            ),
        }
    }
}

/// Receiver for aggregation diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink {
    count: usize,
}

impl LogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics forwarded so far
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        match diagnostic.severity() {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => log::error!("{diagnostic}"),
        }
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics matching a predicate
    pub fn matching<F>(&self, predicate: F) -> Vec<&Diagnostic>
    where
        F: Fn(&Diagnostic) -> bool,
    {
        self.diagnostics.iter().filter(|d| predicate(d)).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
