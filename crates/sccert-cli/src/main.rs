//! # sccert CLI Entry Point
//!
//! Parses arguments and dispatches to the harness driver.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sccert_cli::{run_harness, HarnessArgs};

/// Sidechain certificate proof test driver.
///
/// Assembles the public inputs of an end-of-epoch certificate, creates
/// a proof through the proof engine, and optionally reloads the
/// persisted proof and verification key to verify it.
#[derive(Parser, Debug)]
#[command(name = "sccert", version, about)]
struct Cli {
    #[command(flatten)]
    args: HarnessArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    match run_harness(&cli.args) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "harness run complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
