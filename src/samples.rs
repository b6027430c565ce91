// File: samples.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::features::escape_csv;
use crate::urlinfo::hostname_of;
use crate::urlscan::UrlscanClient;

/// One entry of the sample list: the scan to fetch and the URL the scan
/// was originally requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRef {
    pub uuid: String,
    pub link: String,
}

/// Outcome counters for a `resolve_url_list` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveReport {
    pub processed: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub skipped: usize,
}

/// Reads a `uuid,link` CSV into sample references. The header row names
/// the columns; their positions are free. Rows missing either field are
/// skipped with a warning rather than aborting the batch.
pub fn load_sample_list(path: &Path) -> Result<Vec<SampleRef>> {
    let file = File::open(path)
        .with_context(|| format!("opening sample list {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.context("reading sample list header")?,
        None => bail!("sample list {} is empty", path.display()),
    };
    let (uuid_idx, link_idx) = match (
        column_index(&header, "uuid"),
        column_index(&header, "link"),
    ) {
        (Some(uuid), Some(link)) => (uuid, link),
        _ => bail!(
            "sample list {} is missing a uuid or link column",
            path.display()
        ),
    };

    let mut samples = Vec::new();
    for (number, line) in lines.enumerate() {
        let line = line.context("reading sample list")?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let uuid = fields.get(uuid_idx).copied().unwrap_or("");
        let link = fields.get(link_idx).copied().unwrap_or("");
        if uuid.is_empty() || link.is_empty() {
            warn!("sample list row {} is incomplete, skipped", number + 2);
            continue;
        }
        samples.push(SampleRef {
            uuid: uuid.to_string(),
            link: link.to_string(),
        });
    }
    Ok(samples)
}

/// Maps a raw URL list onto scan UUIDs via the search API and appends
/// `uuid,link` records to the output list. The output file is created
/// with a header when absent, so repeated runs with advancing `start`
/// offsets extend one list. A URL whose host cannot be recovered still
/// produces a record, with an empty uuid; a URL the search has never
/// seen is dropped.
pub async fn resolve_url_list(
    client: &UrlscanClient,
    input: &Path,
    output: &Path,
    start: usize,
    count: Option<usize>,
) -> Result<ResolveReport> {
    let urls = load_url_list(input)?;
    let end = match count {
        Some(count) => (start + count).min(urls.len()),
        None => urls.len(),
    };
    if start >= urls.len() {
        bail!(
            "start index {} is past the end of {} ({} rows)",
            start,
            input.display(),
            urls.len()
        );
    }

    let mut out = open_sample_list(output)?;
    let mut report = ResolveReport::default();
    for raw in &urls[start..end] {
        report.processed += 1;
        let host = match hostname_of(raw) {
            Some(host) => host,
            None => {
                warn!("no host recoverable from {:?}", raw);
                append_sample(&mut out, "", raw)?;
                report.unresolved += 1;
                continue;
            }
        };
        match client.latest_scan(&host).await {
            Ok(Some(uuid)) => {
                append_sample(&mut out, &uuid, &host)?;
                report.resolved += 1;
            }
            Ok(None) => {
                info!("no scan known for {}, row dropped", host);
                report.skipped += 1;
            }
            Err(e) => {
                warn!("search for {} failed: {:#}", host, e);
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

/// Reads the `url` column of a CSV, header position free.
fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("opening URL list {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.context("reading URL list header")?,
        None => bail!("URL list {} is empty", path.display()),
    };
    let url_idx = column_index(&header, "url")
        .with_context(|| format!("URL list {} is missing a url column", path.display()))?;

    let mut urls = Vec::new();
    for line in lines {
        let line = line.context("reading URL list")?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.get(url_idx) {
            Some(url) if !url.is_empty() => urls.push((*url).to_string()),
            _ => warn!("URL list row without a url value, skipped"),
        }
    }
    Ok(urls)
}

fn column_index(header: &str, name: &str) -> Option<usize> {
    header
        .split(',')
        .position(|field| field.trim().eq_ignore_ascii_case(name))
}

/// Opens the sample list for appending, writing the header only when the
/// file did not exist yet.
fn open_sample_list(path: &Path) -> Result<File> {
    let existed = path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening sample list {}", path.display()))?;
    if !existed {
        writeln!(file, "uuid,link").context("writing sample list header")?;
    }
    Ok(file)
}

fn append_sample(file: &mut File, uuid: &str, link: &str) -> Result<()> {
    writeln!(file, "{},{}", escape_csv(uuid), escape_csv(link))
        .context("appending sample record")
}

#[cfg(test)]
#[path = "samples_tests.rs"]
mod tests;
