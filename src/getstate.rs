// File: getstate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Batch run counters. Atomics so the fan-out tasks can bump them through
/// a shared `Arc` while the driver owns the summary.
#[derive(Debug, Default)]
pub struct ExtractState {
    total_samples: AtomicU64,
    extracted: AtomicU64,
    skipped: AtomicU64,
    start_time: AtomicU64,
    end_time: AtomicU64,
}

impl ExtractState {
    pub fn new() -> ExtractState {
        ExtractState::default()
    }

    pub fn set_total_samples(&self, total: u64) {
        self.total_samples.store(total, Ordering::Relaxed);
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples.load(Ordering::Relaxed)
    }

    pub fn add_extracted(&self) {
        self.extracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn extracted(&self) -> u64 {
        self.extracted.load(Ordering::Relaxed)
    }

    pub fn add_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    pub fn mark_start(&self) {
        self.start_time.store(now_millis(), Ordering::Relaxed);
    }

    pub fn start_time(&self) -> u64 {
        self.start_time.load(Ordering::Relaxed)
    }

    pub fn mark_end(&self) {
        self.end_time.store(now_millis(), Ordering::Relaxed);
    }

    pub fn end_time(&self) -> u64 {
        self.end_time.load(Ordering::Relaxed)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.end_time().saturating_sub(self.start_time())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
