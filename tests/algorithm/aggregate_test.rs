#[cfg(test)]
mod tests {
    use biomarker_dash::{
        BiomarkerError, CollectingSink, DashboardConfig, Diagnostic, NullSink, RangeStatus, RawRow,
        ReferenceRange, aggregate, classify,
    };
    use chrono::NaiveDate;

    fn row(name: &str, date: &str, value: &str, unit: &str, range: &str) -> RawRow {
        RawRow::new(name, date, value, unit, range)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn conflicts(sink: &CollectingSink) -> Vec<&Diagnostic> {
        sink.matching(|d| matches!(d, Diagnostic::RangeConflict { .. }))
    }

    #[test]
    fn test_glucose_end_to_end() {
        let rows = vec![
            row("Glucose", "01/01/20", "90", "mg/dL", "70-99"),
            row("Glucose", "06/01/20", "110", "mg/dL", "70-99"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        assert_eq!(table.len(), 1);
        let glucose = table.get("Glucose").unwrap();
        assert_eq!(glucose.ref_range, ReferenceRange::between(70.0, 99.0));
        assert_eq!(glucose.unit, "mg/dL");

        let history: Vec<(NaiveDate, f64)> = glucose
            .history()
            .iter()
            .map(|e| (e.draw_date, e.value))
            .collect();
        assert_eq!(history, vec![(date(2020, 1, 1), 90.0), (date(2020, 6, 1), 110.0)]);

        assert_eq!(classify(90.0, &glucose.ref_range), RangeStatus::InRange);
        assert_eq!(classify(110.0, &glucose.ref_range), RangeStatus::OutOfRange);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let rows = vec![
            row("TSH", "01/01/20", "1.2", "mIU/L", "0.4-4.5"),
            row("Glucose", "01/01/20", "90", "mg/dL", "70-99"),
            row("TSH", "06/01/20", "2.0", "mIU/L", "0.45-4.5"),
            row("Albumin", "06/01/20", "4.4", "g/dL", "junk"),
        ];
        let config = DashboardConfig::default();

        let first = aggregate(&rows, &config, &mut NullSink).unwrap();
        let second = aggregate(&rows, &config, &mut NullSink).unwrap();
        assert_eq!(first, second);

        let names: Vec<&str> = first.names().collect();
        assert_eq!(names, vec!["TSH", "Glucose", "Albumin"]);
    }

    #[test]
    fn test_later_range_wins() {
        let rows = vec![
            row("TSH", "01/01/20", "1.2", "mIU/L", "0.4-4.5"),
            row("TSH", "06/01/20", "2.0", "mIU/L", "0.45-4.5"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        assert_eq!(
            table.get("TSH").unwrap().ref_range,
            ReferenceRange::between(0.45, 4.5)
        );
        assert_eq!(
            conflicts(&sink),
            vec![&Diagnostic::RangeConflict {
                marker: "TSH".to_string(),
                draw_date: "06/01/20".to_string(),
                previous: ReferenceRange::between(0.4, 4.5),
                current: ReferenceRange::between(0.45, 4.5),
            }]
        );
    }

    #[test]
    fn test_one_conflict_per_differing_pair() {
        let rows = vec![
            row("LDL", "01/01/19", "120", "mg/dL", "<100"),
            row("LDL", "01/01/20", "110", "mg/dL", "<130"),
            row("LDL", "06/01/20", "105", "mg/dL", "<130"),
            row("LDL", "01/01/21", "98", "mg/dL", "<100"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        assert_eq!(table.get("LDL").unwrap().ref_range, ReferenceRange::at_most(100.0));
        assert_eq!(conflicts(&sink).len(), 2);
    }

    #[test]
    fn test_unparseable_row_keeps_earlier_range() {
        let rows = vec![
            row("HDL", "01/01/20", "55", "mg/dL", "> OR = 40"),
            row("HDL", "06/01/20", "58", "mg/dL", "see note"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        assert_eq!(table.get("HDL").unwrap().ref_range, ReferenceRange::at_least(40.0));
        assert!(conflicts(&sink).is_empty());
        assert_eq!(
            sink.matching(|d| matches!(d, Diagnostic::RangeParseError { .. }))
                .len(),
            1
        );
    }

    #[test]
    fn test_marker_without_parseable_range_is_unknown() {
        let rows = vec![
            row("Omega-3 Index", "01/01/20", "6.1", "%", "unparsable"),
            row("Omega-3 Index", "06/01/20", "7.3", "%", ""),
        ];
        let table = aggregate(&rows, &DashboardConfig::default(), &mut NullSink).unwrap();

        let marker = table.get("Omega-3 Index").unwrap();
        assert!(marker.ref_range.is_unknown());
        for entry in marker.history() {
            assert_eq!(classify(entry.value, &marker.ref_range), RangeStatus::Unknown);
        }
    }

    #[test]
    fn test_unit_change_is_reported_not_applied() {
        let rows = vec![
            row("Glucose", "01/01/20", "90", "mg/dL", "70-99"),
            row("Glucose", "06/01/20", "5.5", "mmol/L", "70-99"),
            row("Glucose", "09/01/20", "95", "nan", "70-99"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        let glucose = table.get("Glucose").unwrap();
        assert_eq!(glucose.unit, "mg/dL");
        let values: Vec<f64> = glucose.history().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![90.0, 5.5, 95.0]);
        assert_eq!(
            sink.diagnostics,
            vec![Diagnostic::UnitChanged {
                marker: "Glucose".to_string(),
                draw_date: "06/01/20".to_string(),
                previous: "mg/dL".to_string(),
                current: "mmol/L".to_string(),
            }]
        );
    }

    #[test]
    fn test_history_follows_input_order() {
        let rows = vec![
            row("Ferritin", "06/01/20", "95", "ng/mL", "38-380"),
            row("Ferritin", "01/01/20", "80", "ng/mL", "38-380"),
        ];
        let table = aggregate(&rows, &DashboardConfig::default(), &mut NullSink).unwrap();
        let dates: Vec<NaiveDate> = table
            .get("Ferritin")
            .unwrap()
            .history()
            .iter()
            .map(|e| e.draw_date)
            .collect();
        assert_eq!(dates, vec![date(2020, 6, 1), date(2020, 1, 1)]);
    }

    #[test]
    fn test_malformed_value_is_fatal() {
        let rows = vec![
            row("Glucose", "01/01/20", "90", "mg/dL", "70-99"),
            row("Vitamin D", "01/01/20", "<5", "ng/mL", "30-100"),
        ];
        let err = aggregate(&rows, &DashboardConfig::default(), &mut NullSink).unwrap_err();
        match err {
            BiomarkerError::MalformedRow {
                row,
                line,
                marker,
                reason,
            } => {
                assert_eq!(row, 1);
                assert_eq!(line, None);
                assert_eq!(marker, "Vitamin D");
                assert!(reason.contains("<5"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let rows = vec![row("Glucose", "2020-01-01", "90", "mg/dL", "70-99")];
        let err = aggregate(&rows, &DashboardConfig::default(), &mut NullSink).unwrap_err();
        assert!(matches!(err, BiomarkerError::MalformedRow { row: 0, .. }));
        assert!(err.to_string().contains("2020-01-01"));
    }

    #[test]
    fn test_scale_exemption_is_configurable() {
        let rows = vec![
            row("Platelets", "01/01/20", "250", "x10E3/uL", "150-450"),
            row("Eos (Absolute)", "01/01/20", "0.2", "x10E3/uL", "15-500"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();
        assert_eq!(
            table.get("Platelets").unwrap().ref_range,
            ReferenceRange::between(150.0, 450.0)
        );
        assert_eq!(
            table.get("Eos (Absolute)").unwrap().ref_range,
            ReferenceRange::between(0.015, 0.5)
        );
        assert_eq!(
            sink.matching(|d| matches!(d, Diagnostic::ScaleCorrected { .. }))
                .len(),
            1
        );

        let config = DashboardConfig::default().with_scale_exemption("Eos (Absolute)");
        let table = aggregate(&rows, &config, &mut NullSink).unwrap();
        assert_eq!(
            table.get("Eos (Absolute)").unwrap().ref_range,
            ReferenceRange::between(15.0, 500.0)
        );
    }

    #[test]
    fn test_missing_unit_keeps_scale_correction() {
        let rows = vec![
            row("Neutrophils (Absolute)", "01/01/20", "3.0", "x10E3/uL", "1400-7000"),
            row("Neutrophils (Absolute)", "06/01/20", "3.1", "nan", "1400-7000"),
        ];
        let mut sink = CollectingSink::new();
        let table = aggregate(&rows, &DashboardConfig::default(), &mut sink).unwrap();

        let marker = table.get("Neutrophils (Absolute)").unwrap();
        assert_eq!(marker.ref_range, ReferenceRange::between(1.4, 7.0));
        assert_eq!(marker.unit, "x10E3/uL");
        assert!(conflicts(&sink).is_empty());

        let corrected = sink.matching(|d| matches!(d, Diagnostic::ScaleCorrected { .. }));
        assert_eq!(corrected.len(), 2);
        for diagnostic in corrected {
            match diagnostic {
                Diagnostic::ScaleCorrected { unit, after, .. } => {
                    assert_eq!(unit, "x10E3/uL");
                    assert_eq!(*after, ReferenceRange::between(1.4, 7.0));
                }
                other => panic!("unexpected diagnostic: {other}"),
            }
        }
        for entry in marker.history() {
            assert_eq!(classify(entry.value, &marker.ref_range), RangeStatus::InRange);
        }
    }
}
