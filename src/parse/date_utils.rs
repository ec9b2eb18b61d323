//! Module for handling draw date parsing and formatting.

use chrono::NaiveDate;

use crate::config::DateFormatConfig;

/// Parse a draw date string, trying each configured format in order
#[must_use]
pub fn parse_draw_date(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    config
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Format a date for the report summary
#[must_use]
pub fn format_draw_date(date: NaiveDate, config: &DateFormatConfig) -> String {
    date.format(&config.output_format).to_string()
}
