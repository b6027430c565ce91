// File: runner.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt::Write;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::warn;
use tokio::task::JoinHandle;

use crate::config::ExtractConfig;
use crate::extractor::extract_features;
use crate::features::FeatureRow;
use crate::getstate::ExtractState;
use crate::samples::SampleRef;
use crate::urlinfo::DomainResolver;
use crate::urlscan::UrlscanClient;
use crate::whitelist::Whitelist;

/// Drives a batch extraction: fetches result and DOM for every sample,
/// runs the extraction core, and collects the completed rows. At most
/// `workers` samples are in flight; the client's rate limiter caps the
/// request rate underneath.
#[derive(Debug)]
pub struct Runner {
    pub state_ptr: Arc<ExtractState>,
    config: ExtractConfig,
    client: UrlscanClient,
    whitelist: Arc<Whitelist>,
    resolver: Arc<DomainResolver>,
}

impl Runner {
    pub fn new(
        state_ptr: Arc<ExtractState>,
        config: ExtractConfig,
        client: UrlscanClient,
        whitelist: Arc<Whitelist>,
        resolver: Arc<DomainResolver>,
    ) -> Self {
        Runner {
            state_ptr,
            config,
            client,
            whitelist,
            resolver,
        }
    }

    pub async fn work(&self, samples: Vec<SampleRef>) -> Vec<FeatureRow> {
        let pb = if self.config.suppress_stats() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(samples.len() as u64)
        };
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
            })
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );

        self.state_ptr.set_total_samples(samples.len() as u64);
        self.state_ptr.mark_start();

        let mut results = Vec::new();
        let mut pending = samples.into_iter();
        let mut futures = FuturesUnordered::new();
        for sample in pending.by_ref().take(self.config.workers()) {
            futures.push(self.spawn_sample(sample));
        }

        while let Some(task) = futures.next().await {
            if let Some(sample) = pending.next() {
                futures.push(self.spawn_sample(sample));
            }
            if let Ok(row) = task {
                if let Some(row) = row {
                    results.push(row);
                }
                pb.inc(1);
            }
        }
        pb.finish();

        self.state_ptr.mark_end();
        results
    }

    fn spawn_sample(&self, sample: SampleRef) -> JoinHandle<Option<FeatureRow>> {
        let client = self.client.clone();
        let whitelist = Arc::clone(&self.whitelist);
        let resolver = Arc::clone(&self.resolver);
        let state = Arc::clone(&self.state_ptr);

        tokio::spawn(async move {
            let artifact = match client.result(&sample.uuid).await {
                Ok(artifact) => artifact,
                Err(e) => {
                    warn!("[{}] result fetch failed: {:#}", sample.uuid, e);
                    state.add_skipped();
                    return None;
                }
            };
            let dom = match client.dom(&sample.uuid).await {
                Ok(dom) => dom,
                Err(e) => {
                    warn!("[{}] DOM fetch failed: {:#}", sample.uuid, e);
                    state.add_skipped();
                    return None;
                }
            };

            match extract_features(
                &sample.uuid,
                &sample.link,
                Some(&artifact),
                Some(&dom),
                &whitelist,
                &resolver,
            ) {
                Some(row) => {
                    state.add_extracted();
                    Some(row)
                }
                None => {
                    state.add_skipped();
                    None
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
