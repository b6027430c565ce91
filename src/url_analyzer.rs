// File: url_analyzer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::net::IpAddr;

use url::Url;

use crate::error::{ExtractError, Result};
use crate::urlinfo::{entropy, DomainResolver};

/// Lexical statistics of the requested URL's hostname.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlFeatures {
    pub hostname_length: u32,
    pub subdomain_depth: u32,
    pub has_ip_address: bool,
    pub num_special_chars: u32,
    /// Raw public suffix, empty when none resolves (IP literals).
    pub tld: String,
    pub domain_entropy: f64,
    /// Diagnostic only: the batch flow feeds bare hosts, so this is almost
    /// always false there.
    pub has_query_or_path: bool,
}

pub struct UrlAnalyzer;

impl UrlAnalyzer {
    /// Computes the 7 lexical slots for a URL or bare host. Fails with a
    /// parse fault when no hostname can be recovered; the caller turns
    /// that into 7 missing slots.
    pub fn analyze(input: &str, resolver: &DomainResolver) -> Result<UrlFeatures> {
        let trimmed = input.trim();

        let parsed = match Url::parse(trimmed) {
            Ok(parsed) if parsed.host_str().is_some() => parsed,
            _ => Url::parse(&format!("http://{}", trimmed))
                .map_err(|e| ExtractError::Parse(format!("unparseable URL {:?}: {}", input, e)))?,
        };

        let hostname = parsed
            .host_str()
            .ok_or_else(|| ExtractError::Parse(format!("no hostname in {:?}", input)))?
            .trim_matches(|c| c == '[' || c == ']')
            .to_ascii_lowercase();

        let has_ip_address = hostname.parse::<IpAddr>().is_ok();

        // IP literals carry no subdomain or suffix, so the splitter is
        // consulted only for named hosts.
        let parts = if has_ip_address {
            None
        } else {
            resolver.parts(&hostname)
        };

        let subdomain_depth = parts
            .as_ref()
            .and_then(|parts| parts.subdomain.as_deref())
            .filter(|subdomain| !subdomain.is_empty())
            .map(|subdomain| subdomain.split('.').count() as u32)
            .unwrap_or(0);

        let tld = parts
            .as_ref()
            .and_then(|parts| parts.suffix.clone())
            .unwrap_or_default();

        let registrable = parts
            .as_ref()
            .and_then(|parts| parts.registrable())
            .map(|domain| domain.to_ascii_lowercase());
        let domain_entropy = entropy(registrable.as_deref().unwrap_or(&hostname));

        let num_special_chars = hostname
            .chars()
            .filter(|c| !c.is_ascii_alphanumeric() && *c != '.')
            .count() as u32;

        let path = parsed.path();
        let has_path = !path.is_empty() && path != "/";
        let has_query = parsed.query().map(|q| !q.is_empty()).unwrap_or(false);

        Ok(UrlFeatures {
            hostname_length: hostname.chars().count() as u32,
            subdomain_depth,
            has_ip_address,
            num_special_chars,
            tld,
            domain_entropy,
            has_query_or_path: has_path || has_query,
        })
    }
}

#[cfg(test)]
#[path = "url_analyzer_tests.rs"]
mod tests;
