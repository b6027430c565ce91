// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::num::NonZeroU32;

/// Knobs of a batch extraction run. Defaults match the public urlscan.io
/// quota for unauthenticated clients.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    workers: usize,
    rate_limit: NonZeroU32,
    timeout: u64,
    api_key: Option<String>,
    suppress_stats: bool,
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self {
            workers: 4,
            rate_limit: NonZeroU32::new(2).unwrap(),
            timeout: 30,
            api_key: None,
            suppress_stats: false,
        }
    }

    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.max(1);
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn set_rate_limit(&mut self, rate_limit: NonZeroU32) {
        self.rate_limit = rate_limit;
    }

    pub fn rate_limit(&self) -> NonZeroU32 {
        self.rate_limit
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn set_api_key(&mut self, api_key: Option<String>) {
        self.api_key = api_key;
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn set_suppress_stats(&mut self, suppress_stats: bool) {
        self.suppress_stats = suppress_stats;
    }

    pub fn suppress_stats(&self) -> bool {
        self.suppress_stats
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
