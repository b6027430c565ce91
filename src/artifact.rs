// File: artifact.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Parsed urlscan.io result document.
///
/// Every field is optional: a scan with no cookies, no requests, or no
/// page record is valid input and the analyzers treat absence as data.
/// The artifact is immutable once parsed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanArtifact {
    #[serde(default)]
    pub task: TaskInfo,
    #[serde(default)]
    pub page: PageInfo,
    #[serde(default)]
    pub data: ScanData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInfo {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

/// The `data` block keeps its request and cookie records loosely typed.
/// urlscan emits deeply nested, version-drifting structures there; the
/// navigation helpers below read only the paths the analyzers need.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanData {
    #[serde(default)]
    pub cookies: Vec<Value>,
    #[serde(default)]
    pub requests: Vec<Value>,
}

impl ScanArtifact {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// URL the scan was asked to visit.
    pub fn initial_url(&self) -> Option<&str> {
        self.task.url.as_deref()
    }

    /// URL of the page that finally rendered.
    pub fn final_url(&self) -> Option<&str> {
        self.page.url.as_deref()
    }

    pub fn page_domain(&self) -> Option<&str> {
        self.page.domain.as_deref()
    }

    pub fn cookies(&self) -> &[Value] {
        &self.data.cookies
    }

    /// The request record for the top-level navigated page: the entry whose
    /// `request.primaryRequest` flag, or top-level `primaryRequest` flag,
    /// is true.
    pub fn primary_document(&self) -> Option<&Value> {
        self.data.requests.iter().find(|record| {
            record
                .get("request")
                .and_then(|req| req.get("primaryRequest"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
                || record
                    .get("primaryRequest")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
        })
    }

    /// Primary document, or the first request record when nothing carries
    /// the flag. Returns `None` only when there are no records at all.
    pub fn primary_or_first(&self) -> Option<&Value> {
        self.primary_document().or_else(|| self.data.requests.first())
    }

    /// Response headers of the primary document, keys lowercased.
    /// `None` when there is no document or no header mapping in it.
    pub fn primary_headers(&self) -> Option<HashMap<String, String>> {
        let headers = self
            .primary_or_first()?
            .get("response")?
            .get("response")?
            .get("headers")?
            .as_object()?;

        Some(
            headers
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.to_lowercase(), v.to_string())))
                .collect(),
        )
    }

    /// URLs of the primary document's nested redirect hop list, in
    /// navigation order. Empty when the scan recorded no hop list.
    pub fn redirect_hops(&self) -> Vec<String> {
        let Some(primary) = self.primary_document() else {
            return Vec::new();
        };
        let Some(hops) = primary.get("requests").and_then(Value::as_array) else {
            return Vec::new();
        };

        hops.iter()
            .filter_map(|hop| {
                let hop_req = hop.get("request")?;
                hop_req
                    .get("url")
                    .and_then(Value::as_str)
                    .or_else(|| {
                        hop_req
                            .get("request")
                            .and_then(|inner| inner.get("url"))
                            .and_then(Value::as_str)
                    })
                    .map(str::to_string)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
