mod collectors;
mod error;
mod metrics;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use sysinfo::System;
use tracing_subscriber::EnvFilter;

use crate::collectors::SampleOptions;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    tracing::debug!(?cli, "parsed CLI arguments");

    let mut system = System::new();
    let options = SampleOptions {
        cpu_interval: Duration::from_millis(cli.interval_ms),
        disk_path: &cli.path,
    };

    let snapshot = collectors::take_health_snapshot(&mut system, &options)
        .context("collecting system metrics")?;
    let taken_at = Local::now().naive_local();
    let filepath = collectors::save_snapshot(&snapshot, &cli.output, taken_at)
        .with_context(|| format!("writing snapshot into {}", cli.output.display()))?;

    println!("Metrics saved to {}", filepath.display());
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "healthsnap")]
#[command(about = "Sample CPU, RAM and disk usage once and save a JSON snapshot", long_about = None)]
struct Cli {
    /// Output folder for the snapshot file
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// CPU measurement interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Path whose filesystem usage is reported
    #[arg(long, default_value = "/")]
    path: PathBuf,
}
