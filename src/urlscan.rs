// File: urlscan.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use log::debug;
use serde_json::Value;

use crate::artifact::ScanArtifact;

/// Client for the urlscan.io API. All requests pass a shared direct rate
/// limiter so batch runs stay under the API quota; there are no retries,
/// a failed fetch is the caller's problem to count and skip.
#[derive(Debug, Clone)]
pub struct UrlscanClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl UrlscanClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://urlscan.io";

    pub fn new(api_key: Option<String>, timeout_secs: u64, rate_limit: NonZeroU32) -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL, api_key, timeout_secs, rate_limit)
    }

    /// The base URL is injectable so tests can point the client at a mock
    /// server.
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
        rate_limit: NonZeroU32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build reqwest client");
        UrlscanClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate_limit))),
        }
    }

    /// Fetches and decodes the result document of a finished scan.
    pub async fn result(&self, uuid: &str) -> Result<ScanArtifact> {
        let url = format!("{}/api/v1/result/{}/", self.base_url, uuid);
        let response = self.send(self.client.get(&url)).await?;
        let artifact = response
            .json::<ScanArtifact>()
            .await
            .with_context(|| format!("decoding result document for {}", uuid))?;
        Ok(artifact)
    }

    /// Fetches the rendered DOM snapshot as raw text.
    pub async fn dom(&self, uuid: &str) -> Result<String> {
        let url = format!("{}/dom/{}/", self.base_url, uuid);
        let response = self.send(self.client.get(&url)).await?;
        response
            .text()
            .await
            .with_context(|| format!("reading DOM snapshot for {}", uuid))
    }

    /// UUID of the most recent scan for a domain, `None` when the search
    /// returns no results.
    pub async fn latest_scan(&self, domain: &str) -> Result<Option<String>> {
        let url = format!("{}/api/v1/search/", self.base_url);
        let request = self.client.get(&url).query(&[
            ("q", format!("task.domain.keyword:\"{}\"", domain)),
            ("size", "1".to_string()),
        ]);
        let response = self.send(request).await?;
        let body = response
            .json::<Value>()
            .await
            .with_context(|| format!("decoding search response for {}", domain))?;

        let uuid = body
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(|result| result.get("task"))
            .and_then(|task| task.get("uuid"))
            .and_then(Value::as_str)
            .map(str::to_string);

        debug!("latest_scan({}) -> {:?}", domain, uuid);
        Ok(uuid)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let mut request = request.timeout(self.timeout);
        if let Some(key) = &self.api_key {
            request = request.header("API-Key", key);
        }

        let response = request.send().await.context("urlscan request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("urlscan returned HTTP {} for {}", status, response.url());
        }
        Ok(response)
    }
}
