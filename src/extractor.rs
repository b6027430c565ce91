// File: extractor.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::warn;

use crate::artifact::ScanArtifact;
use crate::dom_analyzer::DomAnalyzer;
use crate::features::{FeatureRow, FeatureValue};
use crate::header_analyzer::HeaderAnalyzer;
use crate::redirect_analyzer::RedirectAnalyzer;
use crate::url_analyzer::UrlAnalyzer;
use crate::urlinfo::{hostname_of, DomainResolver};
use crate::whitelist::Whitelist;

/// Assembles one feature row for a scanned sample.
///
/// The four analyzer groups run independently; a fault in one group fills
/// that group's slots with the missing sentinel and never blocks another.
/// Returns `None` only when a mandatory raw input (result artifact or DOM
/// text) is entirely unavailable.
pub fn extract_features(
    uuid: &str,
    initial_url: &str,
    artifact: Option<&ScanArtifact>,
    dom_html: Option<&str>,
    whitelist: &Whitelist,
    resolver: &DomainResolver,
) -> Option<FeatureRow> {
    let artifact = match artifact {
        Some(artifact) => artifact,
        None => {
            warn!("[{}] no result artifact, sample skipped", uuid);
            return None;
        }
    };
    let dom_html = match dom_html {
        Some(dom) if !dom.is_empty() => dom,
        _ => {
            warn!("[{}] no DOM snapshot, sample skipped", uuid);
            return None;
        }
    };

    // The url identifier column carries the bare host where one can be
    // recovered, otherwise the trimmed input as given.
    let url_identifier =
        hostname_of(initial_url).unwrap_or_else(|| initial_url.trim().to_string());

    let mut values = Vec::with_capacity(FeatureRow::WIDTH);
    values.push(FeatureValue::Text(uuid.to_string()));
    values.push(FeatureValue::Text(url_identifier.clone()));

    match HeaderAnalyzer::analyze(artifact) {
        Ok(headers) => {
            values.push(FeatureValue::Bool(headers.has_x_frame_options));
            values.push(FeatureValue::Bool(headers.has_strict_transport_security));
            values.push(FeatureValue::Bool(headers.has_content_disposition_attachment));
            values.push(FeatureValue::Bool(headers.has_x_xss_protection));
            values.push(FeatureValue::Bool(headers.has_content_security_policy));
            values.push(FeatureValue::Bool(headers.has_x_content_type_options));
            values.push(FeatureValue::Bool(headers.has_cookie_security));
        }
        Err(e) => {
            warn!("[{}] header group degraded: {}", uuid, e);
            values.extend(std::iter::repeat(FeatureValue::Missing).take(7));
        }
    }

    match RedirectAnalyzer::initial_host_whitelisted(artifact, whitelist, resolver) {
        Ok(whitelisted) => values.push(FeatureValue::Bool(whitelisted)),
        Err(e) => {
            warn!("[{}] whitelist membership degraded: {}", uuid, e);
            values.push(FeatureValue::Missing);
        }
    }

    let redirect = RedirectAnalyzer::analyze(artifact, whitelist, resolver);
    values.push(
        redirect
            .level
            .map(|level| FeatureValue::Text(level.as_str().to_string()))
            .unwrap_or(FeatureValue::Missing),
    );
    values.push(
        redirect
            .hop_count
            .map(|hops| FeatureValue::Int(i64::from(hops)))
            .unwrap_or(FeatureValue::Missing),
    );
    values.push(
        redirect
            .host_similarity
            .map(FeatureValue::Float)
            .unwrap_or(FeatureValue::Missing),
    );

    match DomAnalyzer::analyze(dom_html, artifact.page_domain(), resolver) {
        Ok(dom) => {
            values.push(FeatureValue::Int(i64::from(dom.total_nodes)));
            values.push(FeatureValue::Int(i64::from(dom.max_depth)));
            values.push(FeatureValue::Int(i64::from(dom.num_forms)));
            values.push(FeatureValue::Int(i64::from(dom.num_password_fields)));
            values.push(FeatureValue::Bool(dom.form_action_suspicious));
            values.push(FeatureValue::Int(i64::from(dom.num_iframes)));
            values.push(FeatureValue::Bool(dom.has_js_redirect));
            values.push(FeatureValue::Float(dom.percent_external_links));
            values.push(FeatureValue::Int(i64::from(dom.num_hidden_elements)));
        }
        Err(e) => {
            warn!("[{}] DOM group degraded: {}", uuid, e);
            values.extend(std::iter::repeat(FeatureValue::Missing).take(9));
        }
    }

    match UrlAnalyzer::analyze(&url_identifier, resolver) {
        Ok(url) => {
            values.push(FeatureValue::Int(i64::from(url.hostname_length)));
            values.push(FeatureValue::Int(i64::from(url.subdomain_depth)));
            values.push(FeatureValue::Bool(url.has_ip_address));
            values.push(FeatureValue::Int(i64::from(url.num_special_chars)));
            values.push(FeatureValue::Text(url.tld));
            values.push(FeatureValue::Float(url.domain_entropy));
            values.push(FeatureValue::Bool(url.has_query_or_path));
        }
        Err(e) => {
            warn!("[{}] URL group degraded: {}", uuid, e);
            values.extend(std::iter::repeat(FeatureValue::Missing).take(7));
        }
    }

    Some(FeatureRow::from_values(values))
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
