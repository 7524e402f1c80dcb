// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Memory game terminal client.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use memory_core::Config;

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of pairs in a deck.
    #[clap(long, short, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=12))]
    pairs: u8,
    /// Milliseconds mismatched cards stay face up.
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    delay_ms: u64,
    /// Log to stderr.
    #[clap(long)]
    log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .format_target(false)
            .format_timestamp_millis()
            .init();
    }

    let config = Config {
        pairs: cli.pairs as usize,
        mismatch_delay: Duration::from_millis(cli.delay_ms),
    };
    config.validate()?;

    terminal::run(config).await
}
