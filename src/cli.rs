// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use crate::config::ExtractConfig;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Reduce output verbosity",
        global = true
    )]
    pub quiet: bool,

    #[arg(long = "no-color", help = "Disable colored output", global = true)]
    pub no_color: bool,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = 30,
        help = "HTTP request timeout in seconds",
        global = true
    )]
    pub timeout: u64,

    #[arg(
        short = 'r',
        long = "rate-limit",
        default_value_t = 2,
        help = "Maximum API requests per second",
        global = true
    )]
    pub rate_limit: u32,

    #[arg(
        short = 'w',
        long = "workers",
        default_value_t = 4,
        help = "Samples processed concurrently",
        global = true
    )]
    pub workers: usize,

    #[arg(
        short = 'k',
        long = "api-key",
        help = "urlscan.io API key",
        global = true
    )]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract feature rows for a uuid,link sample list
    Extract(ExtractArgs),
    /// Extract a single sample and print the row to stdout
    Sample(SampleArgs),
    /// Map a raw URL list onto scan UUIDs via the search API
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[arg(long = "samples", help = "uuid,link CSV sample list")]
    pub samples: PathBuf,

    #[arg(long = "whitelist", help = "CSV of benign domains")]
    pub whitelist: PathBuf,

    #[arg(short = 'o', long = "output", help = "Feature CSV to append to")]
    pub output: PathBuf,

    #[arg(long = "start", default_value_t = 0, help = "First sample index")]
    pub start: usize,

    #[arg(long = "count", help = "Number of samples to process")]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[arg(long = "uuid", help = "Scan UUID to fetch")]
    pub uuid: String,

    #[arg(long = "url", help = "Initial URL the scan was requested for")]
    pub url: String,

    #[arg(long = "whitelist", help = "CSV of benign domains")]
    pub whitelist: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(short = 'i', long = "input", help = "CSV with a url column")]
    pub input: PathBuf,

    #[arg(short = 'o', long = "output", help = "uuid,link CSV to append to")]
    pub output: PathBuf,

    #[arg(long = "start", default_value_t = 0, help = "First URL index")]
    pub start: usize,

    #[arg(long = "count", help = "Number of URLs to process")]
    pub count: Option<usize>,
}

impl Cli {
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.log_level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Warn,
        }
    }

    pub fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::new();
        config.set_workers(self.workers);
        if let Some(rate_limit) = NonZeroU32::new(self.rate_limit) {
            config.set_rate_limit(rate_limit);
        }
        config.set_timeout(self.timeout);
        config.set_api_key(self.api_key.clone());
        config.set_suppress_stats(self.quiet);
        config
    }
}
