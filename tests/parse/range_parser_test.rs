#[cfg(test)]
mod tests {
    use biomarker_dash::ReferenceRange;
    use biomarker_dash::parse::{RangeRuleKind, match_rule, parse_reference_range};

    fn range(min: Option<f64>, max: Option<f64>) -> ReferenceRange {
        ReferenceRange::new(min, max)
    }

    #[test]
    fn test_documented_examples() {
        let cases = [
            ("0", range(Some(0.0), Some(0.0))),
            ("<5.7", range(None, Some(5.7))),
            (">130", range(Some(130.0), None)),
            ("> OR = 60", range(Some(60.0), None)),
            (">=125", range(Some(125.0), None)),
            ("< OR = 80", range(None, Some(80.0))),
            ("0.2 OR LESS", range(None, Some(0.2))),
            ("3.5-5.3", range(Some(3.5), Some(5.3))),
            ("-2.0 - +2.0", range(Some(-2.0), Some(2.0))),
            ("unparsable", range(None, None)),
        ];

        for (text, expected) in cases {
            assert_eq!(parse_reference_range(text), expected, "parsing {text:?}");
        }
    }

    #[test]
    fn test_missing_values_are_unknown() {
        for text in ["", "   ", "nan", "NaN", "NAN", " nan "] {
            assert!(parse_reference_range(text).is_unknown(), "parsing {text:?}");
        }
    }

    #[test]
    fn test_garbage_never_panics() {
        let inputs = [
            "-",
            "--",
            "<",
            ">",
            ">=",
            "OR LESS",
            "1-",
            "-1",
            "+",
            "1.2.3-4",
            "1,000-2,000",
            "1e5",
            "> OR = abc",
            "Negative",
            "See note",
            "\u{0663}-\u{0665}",
            "3.5 – 5.3",
            "<<5",
            "0-",
        ];
        for text in inputs {
            assert!(parse_reference_range(text).is_unknown(), "parsing {text:?}");
        }
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_reference_range("  3.5-5.3\t"), range(Some(3.5), Some(5.3)));
        assert_eq!(parse_reference_range("< 5.7"), range(None, Some(5.7)));
    }

    #[test]
    fn test_or_keyword_case_insensitive() {
        assert_eq!(parse_reference_range("> or = 60"), range(Some(60.0), None));
        assert_eq!(parse_reference_range("0.2 or less"), range(None, Some(0.2)));
    }

    #[test]
    fn test_signed_bounds_take_priority() {
        assert_eq!(match_rule("-2.0 - +2.0"), Some(RangeRuleKind::SignedBounds));
        assert_eq!(match_rule("-3-+3"), Some(RangeRuleKind::SignedBounds));
        assert_eq!(parse_reference_range("-3-+3"), range(Some(-3.0), Some(3.0)));
        assert_eq!(match_rule("-10-5"), Some(RangeRuleKind::Bounds));
        assert_eq!(parse_reference_range("-10-5"), range(Some(-10.0), Some(5.0)));
    }
}
