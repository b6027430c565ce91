// File: report.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::features::FeatureRow;
use crate::getstate::ExtractState;

/// Appends feature rows to the output CSV. The file is opened in append
/// mode and the header is written only when the file is created, so a
/// long dataset can be assembled across several runs.
#[derive(Debug)]
pub struct FeatureWriter {
    file: File,
}

impl FeatureWriter {
    pub fn open(path: &Path) -> Result<Self> {
        let existed = path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening feature output {}", path.display()))?;
        if !existed {
            writeln!(file, "{}", FeatureRow::header_record())
                .context("writing feature header")?;
        }
        Ok(Self { file })
    }

    pub fn append(&mut self, row: &FeatureRow) -> Result<()> {
        writeln!(self.file, "{}", row.to_csv_record()).context("appending feature row")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.file.flush().context("flushing feature output")
    }
}

fn human_readable_time(time: u64) -> String {
    chrono::DateTime::from_timestamp((time / 1000) as i64, 0)
        .map(|t| t.naive_utc().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Run summary line, printed once at the end of a batch.
pub fn print_summary(state: &ExtractState) {
    println!();
    println!(
        "{} samples. Started at {} / Ended at {}. {} ms. {}: {}. {}: {}.",
        state.total_samples(),
        human_readable_time(state.start_time()),
        human_readable_time(state.end_time()),
        state.elapsed_ms(),
        "Extracted".green(),
        state.extracted(),
        "Skipped".red(),
        state.skipped()
    );
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
