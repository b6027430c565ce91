// File: whitelist.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use crate::urlinfo::DomainResolver;

/// Set of registrable domains considered legitimate. Built once from a
/// CSV/line list, immutable afterwards, shared read-only across samples.
#[derive(Debug, Default)]
pub struct Whitelist {
    domains: HashSet<String>,
}

impl Whitelist {
    /// Loads a whitelist file. A missing file or unreadable entries degrade
    /// to a smaller (possibly empty) set, never to a failure.
    pub fn from_file<P: AsRef<Path>>(path: P, resolver: &DomainResolver) -> Self {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Whitelist file {} not readable: {}", path.display(), e);
                return Self::default();
            }
        };

        let whitelist = Self::from_reader(BufReader::new(file), resolver);
        info!(
            "Loaded {} whitelist domains from {}",
            whitelist.len(),
            path.display()
        );
        whitelist
    }

    /// Reads the leading field of `domain,rank`-style or plain-domain
    /// lines. The first record is
    /// treated as a header and skipped when its leading field contains the
    /// token `domain` (case-insensitive). Every other entry is normalized to
    /// its registrable domain; entries that do not resolve are skipped.
    pub fn from_reader<R: BufRead>(reader: R, resolver: &DomainResolver) -> Self {
        let mut domains = HashSet::new();
        let mut first_record = true;

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping unreadable whitelist line: {}", e);
                    continue;
                }
            };

            let entry = line.split(',').next().unwrap_or("").trim().to_string();

            if first_record {
                first_record = false;
                if entry.to_lowercase().contains("domain") {
                    continue;
                }
            }

            if entry.is_empty() {
                continue;
            }

            match resolver.registrable_domain(&entry) {
                Some(domain) => {
                    domains.insert(domain);
                }
                None => {
                    warn!("Whitelist entry {:?} has no registrable domain, skipped", entry);
                }
            }
        }

        Self { domains }
    }

    /// Membership test against an already-normalized registrable domain.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
