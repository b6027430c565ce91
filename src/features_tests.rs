// File: features_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::features::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_width_and_identifiers() {
        assert_eq!(FeatureRow::WIDTH, 29);
        assert_eq!(FEATURE_COLUMNS[0], "uuid");
        assert_eq!(FEATURE_COLUMNS[1], "url");
        assert_eq!(FEATURE_COLUMNS[10], "mixed_redirection_level");
        assert_eq!(FEATURE_COLUMNS[28], "url_has_query_or_path");
    }

    #[test]
    fn test_boolean_cells_render_as_digits() {
        assert_eq!(FeatureValue::Bool(true).to_csv_cell(), "1");
        assert_eq!(FeatureValue::Bool(false).to_csv_cell(), "0");
    }

    #[test]
    fn test_missing_renders_as_empty_cell() {
        assert_eq!(FeatureValue::Missing.to_csv_cell(), "");
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(FeatureValue::Int(42).to_csv_cell(), "42");
        assert_eq!(FeatureValue::Float(62.5).to_csv_cell(), "62.5");
    }

    #[test]
    fn test_escape_csv_quotes_delimiters() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_header_record_matches_column_list() {
        let header = FeatureRow::header_record();
        assert!(header.starts_with("uuid,url,has_x_frame_options"));
        assert!(header.ends_with("url_domain_entropy,url_has_query_or_path"));
        assert_eq!(header.split(',').count(), FeatureRow::WIDTH);
    }

    #[test]
    fn test_row_round_trip_rendering() {
        let mut values = vec![
            FeatureValue::Text("uuid-1".to_string()),
            FeatureValue::Text("example.com".to_string()),
        ];
        values.resize(FeatureRow::WIDTH, FeatureValue::Missing);
        let row = FeatureRow::from_values(values);

        let record = row.to_csv_record();
        assert!(record.starts_with("uuid-1,example.com,"));
        assert_eq!(record.split(',').count(), FeatureRow::WIDTH);
    }

    #[test]
    fn test_get_by_column_name() {
        let mut values = vec![
            FeatureValue::Text("uuid-1".to_string()),
            FeatureValue::Text("example.com".to_string()),
        ];
        values.resize(FeatureRow::WIDTH, FeatureValue::Missing);
        let row = FeatureRow::from_values(values);

        assert_eq!(
            row.get("url"),
            Some(&FeatureValue::Text("example.com".to_string()))
        );
        assert_eq!(row.get("dom_num_forms"), Some(&FeatureValue::Missing));
        assert_eq!(row.get("no_such_column"), None);
    }

    #[test]
    #[should_panic(expected = "feature row width mismatch")]
    fn test_width_mismatch_panics() {
        FeatureRow::from_values(vec![FeatureValue::Missing]);
    }
}
