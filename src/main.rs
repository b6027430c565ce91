// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use log::info;
use simple_logger::SimpleLogger;

use phishprobe::cli::{Cli, Commands, ExtractArgs, ResolveArgs, SampleArgs};
use phishprobe::config::ExtractConfig;
use phishprobe::extractor::extract_features;
use phishprobe::features::FeatureRow;
use phishprobe::getstate::ExtractState;
use phishprobe::report::{print_summary, FeatureWriter};
use phishprobe::runner::Runner;
use phishprobe::samples::{load_sample_list, resolve_url_list};
use phishprobe::urlinfo::DomainResolver;
use phishprobe::urlscan::UrlscanClient;
use phishprobe::whitelist::Whitelist;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(cli.log_level_filter())
        .init()
        .context("initializing logger")?;
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.extract_config();
    match &cli.command {
        Commands::Extract(args) => run_extract(args, &config).await,
        Commands::Sample(args) => run_sample(args, &config).await,
        Commands::Resolve(args) => run_resolve(args, &config).await,
    }
}

fn client_for(config: &ExtractConfig) -> UrlscanClient {
    UrlscanClient::new(
        config.api_key().map(str::to_string),
        config.timeout(),
        config.rate_limit(),
    )
}

async fn run_extract(args: &ExtractArgs, config: &ExtractConfig) -> Result<()> {
    let resolver = DomainResolver::new();
    let whitelist = Whitelist::from_file(&args.whitelist, &resolver);
    info!("whitelist holds {} domains", whitelist.len());

    let mut samples = load_sample_list(&args.samples)?;
    if args.start >= samples.len() {
        bail!(
            "start index {} is past the end of {} ({} samples)",
            args.start,
            args.samples.display(),
            samples.len()
        );
    }
    let end = match args.count {
        Some(count) => (args.start + count).min(samples.len()),
        None => samples.len(),
    };
    samples = samples.drain(args.start..end).collect();

    let state = Arc::new(ExtractState::new());
    let runner = Runner::new(
        Arc::clone(&state),
        config.clone(),
        client_for(config),
        Arc::new(whitelist),
        Arc::new(resolver),
    );
    let rows = runner.work(samples).await;

    let mut writer = FeatureWriter::open(&args.output)?;
    for row in &rows {
        writer.append(row)?;
    }
    writer.flush()?;

    if !config.suppress_stats() {
        print_summary(&state);
    }
    Ok(())
}

async fn run_sample(args: &SampleArgs, config: &ExtractConfig) -> Result<()> {
    let resolver = DomainResolver::new();
    let whitelist = Whitelist::from_file(&args.whitelist, &resolver);
    let client = client_for(config);

    let artifact = client.result(&args.uuid).await?;
    let dom = client.dom(&args.uuid).await?;

    let row = extract_features(
        &args.uuid,
        &args.url,
        Some(&artifact),
        Some(&dom),
        &whitelist,
        &resolver,
    );
    match row {
        Some(row) => {
            println!("{}", FeatureRow::header_record());
            println!("{}", row.to_csv_record());
            Ok(())
        }
        None => bail!("sample {} yielded no feature row", args.uuid),
    }
}

async fn run_resolve(args: &ResolveArgs, config: &ExtractConfig) -> Result<()> {
    let client = client_for(config);
    let report = resolve_url_list(&client, &args.input, &args.output, args.start, args.count)
        .await?;

    if !config.suppress_stats() {
        println!(
            "{} URLs. {}: {}. {}: {}. Dropped: {}.",
            report.processed,
            "Resolved".green(),
            report.resolved,
            "Unresolved".red(),
            report.unresolved,
            report.skipped
        );
    }
    Ok(())
}
