//! reelweek CLI Binary
//!
//! Command-line front end for the weekly content planner.

use anyhow::Context;
use clap::Parser;
use reelweek::cli::{Cli, RunContext};
use reelweek::config::{ConfigLoader, PlannerConfig};
use reelweek::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("reelweek starting");
    match run(&cli, config) {
        Ok(output) => {
            info!("Command completed");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(2);
        }
    }
}

/// One current-thread runtime: every orchestrator update runs on a single event loop.
fn run(cli: &Cli, config: PlannerConfig) -> anyhow::Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let context = RunContext::new(config).context("Failed to set up the generation backend")?;
    let output = runtime.block_on(context.execute(&cli.command))?;
    Ok(output)
}

/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &PlannerConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    logging
}
