//! Trace-driven workload dispatcher CLI.
//!
//! Loads a job trace, records the teardown script, then fires one submission
//! task per unit at its arrival offset and waits for all of them.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use job_dispatcher::{
    Dispatcher, DispatcherConfig, KubectlSubmitter, TeardownRecorder,
    config::{DEFAULT_IMAGE, DEFAULT_SCHEDULER_NAME},
    partition::{DEFAULT_GPU_CEILING, PartitionMode},
    trace,
};

#[derive(Parser)]
#[command(name = "dispatcher", about = "Trace-driven synthetic workload dispatcher")]
struct Cli {
    /// Path to the JSON trace file
    #[arg(long, default_value = "traces.json")]
    trace: PathBuf,

    /// Force one single-GPU pod per requested GPU
    #[arg(long)]
    single: bool,

    /// Per-pod GPU ceiling in packed mode
    #[arg(long, default_value_t = DEFAULT_GPU_CEILING,
          value_parser = clap::value_parser!(u32).range(1..))]
    ceiling: u32,

    /// Container image for generated jobs
    #[arg(long, default_value = DEFAULT_IMAGE)]
    image: String,

    /// schedulerName assigned to generated pods
    #[arg(long, default_value = DEFAULT_SCHEDULER_NAME)]
    scheduler_name: String,

    /// Path of the generated teardown script
    #[arg(long, default_value = "delete.sh")]
    teardown: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let mode = if cli.single {
        PartitionMode::SingleGpu
    } else {
        PartitionMode::Packed {
            ceiling: cli.ceiling,
        }
    };
    let config = DispatcherConfig::new(cli.trace, mode, cli.image, cli.scheduler_name, cli.teardown);

    tracing::info!(
        "using trace {} with single GPU mode {}",
        config.partition_name,
        cli.single
    );

    // Trace and teardown failures are fatal before any scheduling begins.
    let entries = trace::load(&config.trace_path)?;
    let recorder = TeardownRecorder::create(&config.teardown_path)?;

    let report = Dispatcher::new(config, KubectlSubmitter, recorder)
        .run(&entries)
        .await;

    // Individual failures never change the exit status; the tool's job is to
    // generate as much load as the trace describes.
    tracing::info!(
        "dispatched {} units: {} succeeded, {} failed",
        report.total,
        report.succeeded,
        report.failed
    );
    Ok(())
}
