//! Raw lab export rows

/// One observation as read from the export, before any parsing.
///
/// Draw date and value stay textual: deciding whether a malformed row is
/// fatal belongs to the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub marker_name: String,
    pub description: Option<String>,
    pub draw_date: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    /// Line in the source CSV, counting the header as line 1
    pub line: Option<u64>,
}

impl RawRow {
    /// Create a row; the marker name is trimmed
    #[must_use]
    pub fn new(
        marker_name: &str,
        draw_date: &str,
        value: &str,
        unit: &str,
        reference_range: &str,
    ) -> Self {
        Self {
            marker_name: marker_name.trim().to_string(),
            description: None,
            draw_date: draw_date.to_string(),
            value: value.to_string(),
            unit: unit.to_string(),
            reference_range: reference_range.to_string(),
            line: None,
        }
    }

    /// Record the source line the row was read from
    #[must_use]
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a marker description
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        let description = description.trim();
        self.description = (!is_missing(description)).then(|| description.to_string());
        self
    }

    /// Unit with missing markers (`""`, `nan`) mapped to `None`
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        let unit = self.unit.trim();
        (!is_missing(unit)).then_some(unit)
    }

    /// True when the row carries any reference range text
    #[must_use]
    pub fn has_reference_range(&self) -> bool {
        !is_missing(self.reference_range.trim())
    }
}

/// Empty cells and pandas-style `nan` both mean "no value"
#[must_use]
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || cell.eq_ignore_ascii_case("nan")
}
