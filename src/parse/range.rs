//! Reference range parsing
//!
//! Lab exports write reference ranges in a handful of free-text shapes
//! (`3.5-5.3`, `<5.7`, `> OR = 60`, `0.2 OR LESS`, ...). Each recognized
//! shape is one entry of [`RANGE_RULES`], tried in order; the first whose
//! pattern matches decides the result. Order matters: the explicitly signed
//! form `-2.0 - +2.0` has to be tried before the plain dash-separated form,
//! otherwise the leading sign reads as a separator.
//!
//! Parsing never fails. Anything unrecognized yields
//! [`ReferenceRange::UNKNOWN`].

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::range::ReferenceRange;
use crate::models::row::is_missing;

/// Optionally signed decimal without exponent
const NUMBER: &str = r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)";
/// Unsigned decimal without exponent
const UNSIGNED: &str = r"(?:\d+(?:\.\d*)?|\.\d+)";

/// Recognized reference range shapes, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeRuleKind {
    /// `0`
    Zero,
    /// `<5.7`
    LessThan,
    /// `>130`
    GreaterThan,
    /// `> OR = 60`, `>=125`
    GreaterOrEqual,
    /// `< OR = 80`, `<=80`
    LessOrEqual,
    /// `0.2 OR LESS`
    OrLess,
    /// `-2.0 - +2.0`
    SignedBounds,
    /// `3.5-5.3`
    Bounds,
}

impl RangeRuleKind {
    /// Build the range from the captures of this rule's pattern
    fn extract(self, caps: &Captures<'_>) -> Option<ReferenceRange> {
        let number = |group: usize| -> Option<f64> { caps.get(group)?.as_str().parse().ok() };

        match self {
            Self::Zero => Some(ReferenceRange::between(0.0, 0.0)),
            Self::LessThan | Self::LessOrEqual | Self::OrLess => {
                Some(ReferenceRange::at_most(number(1)?))
            }
            Self::GreaterThan | Self::GreaterOrEqual => Some(ReferenceRange::at_least(number(1)?)),
            // Textual left-right order, no reordering
            Self::SignedBounds | Self::Bounds => {
                Some(ReferenceRange::between(number(1)?, number(2)?))
            }
        }
    }
}

impl fmt::Display for RangeRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::LessThan => "less-than",
            Self::GreaterThan => "greater-than",
            Self::GreaterOrEqual => "greater-or-equal",
            Self::LessOrEqual => "less-or-equal",
            Self::OrLess => "or-less",
            Self::SignedBounds => "signed-bounds",
            Self::Bounds => "bounds",
        };
        f.write_str(name)
    }
}

/// A pattern paired with the rule that extracts bounds from it
#[derive(Debug)]
pub struct RangeRule {
    pub kind: RangeRuleKind,
    pattern: Regex,
}

impl RangeRule {
    fn new(kind: RangeRuleKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    /// Source of the compiled pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Reference range rules in the order they are tried
pub static RANGE_RULES: LazyLock<Vec<RangeRule>> = LazyLock::new(|| {
    vec![
        RangeRule::new(RangeRuleKind::Zero, r"^0$"),
        RangeRule::new(RangeRuleKind::LessThan, &format!(r"^<\s*({NUMBER})$")),
        RangeRule::new(RangeRuleKind::GreaterThan, &format!(r"^>\s*({NUMBER})$")),
        RangeRule::new(
            RangeRuleKind::GreaterOrEqual,
            &format!(r"(?i)^>\s*(?:OR\s*)?=\s*({NUMBER})$"),
        ),
        RangeRule::new(
            RangeRuleKind::LessOrEqual,
            &format!(r"(?i)^<\s*(?:OR\s*)?=\s*({NUMBER})$"),
        ),
        RangeRule::new(
            RangeRuleKind::OrLess,
            &format!(r"(?i)^({NUMBER})\s+OR\s+LESS$"),
        ),
        RangeRule::new(
            RangeRuleKind::SignedBounds,
            &format!(r"^([+-]{UNSIGNED})\s*-\s*([+-]{UNSIGNED})$"),
        ),
        RangeRule::new(
            RangeRuleKind::Bounds,
            &format!(r"^({NUMBER})\s*-\s*({NUMBER})$"),
        ),
    ]
});

/// Find the first rule whose pattern matches `range_text`
#[must_use]
pub fn match_rule(range_text: &str) -> Option<RangeRuleKind> {
    let text = range_text.trim();
    if is_missing(text) {
        return None;
    }
    RANGE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.kind)
}

/// Parse a reference range string into `(min, max)` bounds.
///
/// Empty text, `nan` in any case and unrecognized text all give
/// [`ReferenceRange::UNKNOWN`]. A numeric failure inside a matched rule
/// gives the unknown range as well.
#[must_use]
pub fn parse_reference_range(range_text: &str) -> ReferenceRange {
    let text = range_text.trim();
    if is_missing(text) {
        return ReferenceRange::UNKNOWN;
    }

    for rule in RANGE_RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            return rule.kind.extract(&caps).unwrap_or(ReferenceRange::UNKNOWN);
        }
    }

    ReferenceRange::UNKNOWN
}
