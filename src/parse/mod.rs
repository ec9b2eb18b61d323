//! Parsers for the free-text cells of a lab export.
//!
//! None of these return errors: unrecognized input maps to a sentinel
//! (`ReferenceRange::UNKNOWN`, `None`) and the caller decides what to report.

pub mod date_utils;
pub mod range;
pub mod unit;

pub use date_utils::{format_draw_date, parse_draw_date};
pub use range::{RANGE_RULES, RangeRule, RangeRuleKind, match_rule, parse_reference_range};
pub use unit::{ScaleCorrection, normalize_scale};
