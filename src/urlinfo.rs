// File: urlinfo.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::HashMap;

use tldextract::{TldExtractor, TldOption};
use url::Url;

/// Extracts the hostname from a URL-ish string.
///
/// Scheme-less inputs are retried with an assumed `http://` prefix, IPv6
/// brackets are stripped and the result is lowercased. Returns `None` when
/// no host can be recovered.
pub fn hostname_of(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let host = match Url::parse(trimmed) {
        Ok(parsed) if parsed.host_str().is_some() => parsed.host_str().map(str::to_string),
        _ => Url::parse(&format!("http://{}", trimmed))
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string)),
    };

    host.map(|h| {
        h.trim_matches(|c| c == '[' || c == ']')
            .to_ascii_lowercase()
    })
}

/// Shannon entropy in bits over the character distribution of `s`.
/// The empty string has entropy 0.
pub fn entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        len += 1;
    }

    let len = len as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Normalized Levenshtein similarity in `[0, 1]`. Symmetric; two empty
/// strings compare as identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainParts {
    pub subdomain: Option<String>,
    pub domain: Option<String>,
    pub suffix: Option<String>,
}

impl DomainParts {
    /// Registrable domain (eTLD+1), available only when both the domain and
    /// the public suffix resolved. IP literals and bare suffixes yield `None`.
    pub fn registrable(&self) -> Option<String> {
        match (&self.domain, &self.suffix) {
            (Some(domain), Some(suffix)) => Some(format!("{}.{}", domain, suffix)),
            _ => None,
        }
    }
}

/// Public-suffix-aware hostname splitter, built once per run and shared
/// read-only across samples.
#[derive(Debug)]
pub struct DomainResolver {
    extractor: TldExtractor,
}

impl DomainResolver {
    pub fn new() -> Self {
        Self {
            extractor: TldOption::default().build(),
        }
    }

    pub fn parts(&self, host: &str) -> Option<DomainParts> {
        let extracted = self.extractor.extract(host).ok()?;
        Some(DomainParts {
            subdomain: extracted.subdomain,
            domain: extracted.domain,
            suffix: extracted.suffix,
        })
    }

    /// Registrable domain of `host`, lowercased. `None` when the public
    /// suffix cannot be resolved for the input.
    pub fn registrable_domain(&self, host: &str) -> Option<String> {
        self.parts(host)
            .and_then(|parts| parts.registrable())
            .map(|d| d.to_ascii_lowercase())
    }
}

#[cfg(test)]
#[path = "urlinfo_tests.rs"]
mod tests;
