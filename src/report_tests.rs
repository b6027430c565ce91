// File: report_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::features::{FeatureRow, FeatureValue};
    use crate::report::FeatureWriter;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn sample_row(uuid: &str) -> FeatureRow {
        let mut values = vec![
            FeatureValue::Text(uuid.to_string()),
            FeatureValue::Text("example.com".to_string()),
        ];
        values.resize(FeatureRow::WIDTH, FeatureValue::Missing);
        FeatureRow::from_values(values)
    }

    #[test]
    fn test_new_file_gets_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.csv");

        let mut writer = FeatureWriter::open(&path).unwrap();
        writer.append(&sample_row("u1")).unwrap();
        writer.flush().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some(FeatureRow::header_record().as_str()));
        let row = lines.next().unwrap();
        assert!(row.starts_with("u1,example.com,"));
        assert_eq!(row.split(',').count(), FeatureRow::WIDTH);
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_reopen_appends_without_second_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.csv");

        {
            let mut writer = FeatureWriter::open(&path).unwrap();
            writer.append(&sample_row("u1")).unwrap();
        }
        {
            let mut writer = FeatureWriter::open(&path).unwrap();
            writer.append(&sample_row("u2")).unwrap();
        }

        let written = fs::read_to_string(&path).unwrap();
        let headers = written
            .lines()
            .filter(|line| *line == FeatureRow::header_record())
            .count();
        assert_eq!(headers, 1);
        assert_eq!(written.lines().count(), 3);
    }
}
