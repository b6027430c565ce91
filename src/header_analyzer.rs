// File: header_analyzer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::debug;
use serde_json::Value;

use crate::artifact::ScanArtifact;
use crate::error::{ExtractError, Result};

/// Security posture of the primary document's response headers and the
/// scan's cookie jar. One boolean per published feature slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFeatures {
    pub has_x_frame_options: bool,
    pub has_strict_transport_security: bool,
    pub has_content_disposition_attachment: bool,
    pub has_x_xss_protection: bool,
    pub has_content_security_policy: bool,
    pub has_x_content_type_options: bool,
    pub has_cookie_security: bool,
}

pub struct HeaderAnalyzer;

impl HeaderAnalyzer {
    /// Derives the 7 header/cookie booleans. Fails with a structural fault
    /// when the artifact has no primary document header mapping; the caller
    /// turns that into 7 missing slots.
    pub fn analyze(artifact: &ScanArtifact) -> Result<HeaderFeatures> {
        let headers = artifact.primary_headers().ok_or_else(|| {
            ExtractError::Structural("primary document response headers absent".to_string())
        })?;

        debug!("Header analyzer saw {} response headers", headers.len());

        let has_content_disposition_attachment = headers
            .get("content-disposition")
            .map(|v| v.to_lowercase().contains("attachment"))
            .unwrap_or(false);

        Ok(HeaderFeatures {
            has_x_frame_options: headers.contains_key("x-frame-options"),
            has_strict_transport_security: headers.contains_key("strict-transport-security"),
            has_content_disposition_attachment,
            has_x_xss_protection: headers.contains_key("x-xss-protection"),
            has_content_security_policy: headers.contains_key("content-security-policy"),
            has_x_content_type_options: headers.contains_key("x-content-type-options"),
            has_cookie_security: cookie_security(artifact.cookies()),
        })
    }
}

/// True iff every cookie carries both `secure` and `httpOnly`. A scan
/// without cookies has nothing insecure to flag, so it passes.
fn cookie_security(cookies: &[Value]) -> bool {
    cookies
        .iter()
        .all(|cookie| truthy(cookie.get("secure")) && truthy(cookie.get("httpOnly")))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
#[path = "header_analyzer_tests.rs"]
mod tests;
