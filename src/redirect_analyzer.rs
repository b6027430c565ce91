// File: redirect_analyzer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::debug;

use crate::artifact::ScanArtifact;
use crate::error::{ExtractError, Result};
use crate::urlinfo::{hostname_of, similarity, DomainResolver};
use crate::whitelist::Whitelist;

/// Risk level of the navigation from the requested URL to the page that
/// finally rendered, classified over whitelist membership of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectLevel {
    /// No cross-domain redirect, or whitelisted to whitelisted.
    Level0,
    /// Whitelisted origin redirecting onto an unknown domain.
    Level1,
    /// Unknown to unknown.
    Level2,
    /// Unknown origin redirecting onto a whitelisted domain.
    Level3,
}

impl RedirectLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectLevel::Level0 => "level0",
            RedirectLevel::Level1 => "level1",
            RedirectLevel::Level2 => "level2",
            RedirectLevel::Level3 => "level3",
        }
    }
}

impl std::fmt::Display for RedirectLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three slots fail independently: a hop list that cannot be walked
/// leaves `level` and `host_similarity` intact, and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedirectFeatures {
    pub level: Option<RedirectLevel>,
    pub hop_count: Option<u32>,
    pub host_similarity: Option<f64>,
}

pub struct RedirectAnalyzer;

impl RedirectAnalyzer {
    /// Classifies the redirect chain of a scan. When either end of the
    /// navigation is unknown the whole group is missing; partial hostname
    /// or domain failures degrade per slot.
    pub fn analyze(
        artifact: &ScanArtifact,
        whitelist: &Whitelist,
        resolver: &DomainResolver,
    ) -> RedirectFeatures {
        let (Some(initial_url), Some(final_url)) = (artifact.initial_url(), artifact.final_url())
        else {
            debug!("Redirect analyzer: navigation endpoints absent, group skipped");
            return RedirectFeatures::default();
        };

        let initial_host = hostname_of(initial_url);
        let final_host = hostname_of(final_url);

        let initial_domain = initial_host
            .as_deref()
            .and_then(|host| resolver.registrable_domain(host));
        let final_domain = final_host
            .as_deref()
            .and_then(|host| resolver.registrable_domain(host));

        let host_similarity = match (&initial_host, &final_host) {
            (Some(a), Some(b)) => Some(similarity(a, b)),
            _ => None,
        };

        let level = Some(classify(
            &initial_host,
            &final_host,
            initial_domain.as_deref(),
            final_domain.as_deref(),
            whitelist,
        ));

        let hop_count = Some(count_hops(artifact, initial_url, final_url));

        RedirectFeatures {
            level,
            hop_count,
            host_similarity,
        }
    }

    /// Whether the registrable domain of the requested URL is whitelisted.
    /// Shares its inputs with the redirect group but fills its own slot.
    pub fn initial_host_whitelisted(
        artifact: &ScanArtifact,
        whitelist: &Whitelist,
        resolver: &DomainResolver,
    ) -> Result<bool> {
        let initial_url = artifact
            .initial_url()
            .ok_or_else(|| ExtractError::Structural("task url absent".to_string()))?;
        let host = hostname_of(initial_url)
            .ok_or_else(|| ExtractError::Parse(format!("no hostname in {:?}", initial_url)))?;

        Ok(resolver
            .registrable_domain(&host)
            .map(|domain| whitelist.contains(&domain))
            .unwrap_or(false))
    }
}

/// Level table, evaluated in its published branch order. The non-redirect
/// check wins before any whitelist comparison; when a registrable domain is
/// unavailable on either side the redirect test falls back to hostname
/// inequality.
fn classify(
    initial_host: &Option<String>,
    final_host: &Option<String>,
    initial_domain: Option<&str>,
    final_domain: Option<&str>,
    whitelist: &Whitelist,
) -> RedirectLevel {
    let is_redirect = match (initial_domain, final_domain) {
        (Some(initial), Some(fin)) => initial != fin,
        _ => initial_host != final_host,
    };

    let origin_whitelisted = initial_domain
        .map(|domain| whitelist.contains(domain))
        .unwrap_or(false);
    let target_whitelisted = final_domain
        .map(|domain| whitelist.contains(domain))
        .unwrap_or(false);

    if !is_redirect {
        RedirectLevel::Level0
    } else if origin_whitelisted && target_whitelisted {
        RedirectLevel::Level0
    } else if origin_whitelisted && !target_whitelisted {
        RedirectLevel::Level1
    } else if !origin_whitelisted && !target_whitelisted {
        RedirectLevel::Level2
    } else {
        RedirectLevel::Level3
    }
}

/// Walks the primary document's hop list and counts host-changing adjacent
/// pairs. A scan without a hop list gets a synthesized two-element chain
/// from the navigation endpoints.
fn count_hops(artifact: &ScanArtifact, initial_url: &str, final_url: &str) -> u32 {
    let mut chain = artifact.redirect_hops();
    if chain.is_empty() {
        chain.push(initial_url.to_string());
        if final_url != initial_url {
            chain.push(final_url.to_string());
        }
    }

    let mut hops = 0u32;
    for pair in chain.windows(2) {
        let from = hostname_of(&pair[0]);
        let to = hostname_of(&pair[1]);
        if let (Some(from), Some(to)) = (from, to) {
            if from != to {
                hops += 1;
            }
        }
    }
    hops
}

#[cfg(test)]
#[path = "redirect_analyzer_tests.rs"]
mod tests;
