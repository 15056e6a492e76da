//! Standalone mock telemetry ingestion backends.
//!
//! Brings up the configured mock services on their well-known ports and
//! serves until interrupted, so telemetry exporters under test have a local
//! stand-in for the real logging and metrics write APIs.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use telemetry_ingest_server_harness::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SinkArg {
    Console,
    File,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Logging,
    Metrics,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunModeArg {
    UntilSignal,
    Once,
}

/// Mock telemetry ingestion backends for exporter testing
#[derive(Debug, Parser)]
#[command(name = "cloudmock", version, about)]
struct Args {
    /// Where mock services report received requests
    #[arg(long, value_enum, default_value_t = SinkArg::Console)]
    sink: SinkArg,

    /// Directory for file-sink event files
    #[arg(long)]
    target_directory: Option<PathBuf>,

    /// Service to expose; repeat for more than one (default: all)
    #[arg(long = "service", value_enum)]
    services: Vec<ServiceArg>,

    /// Host to bind the listeners on
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Listen port for the logging service
    #[arg(long)]
    logging_port: Option<u16>,

    /// Listen port for the metrics service
    #[arg(long)]
    metrics_port: Option<u16>,

    /// When the harness stops serving
    #[arg(long, value_enum, default_value_t = RunModeArg::UntilSignal)]
    run_mode: RunModeArg,
}

fn harness_config(args: &Args) -> HarnessConfig {
    let mut config = HarnessConfig::new()
        .with_sink(match args.sink {
            SinkArg::Console => SinkKind::Console,
            SinkArg::File => SinkKind::File,
        })
        .with_host(args.host.clone())
        .with_run_mode(match args.run_mode {
            RunModeArg::UntilSignal => RunMode::ServeUntilSignal,
            RunModeArg::Once => RunMode::ServeOnce,
        });
    if let Some(directory) = &args.target_directory {
        config = config.with_target_directory(directory);
    }
    if !args.services.is_empty() {
        let services: Vec<ServiceKind> = args
            .services
            .iter()
            .map(|service| match service {
                ServiceArg::Logging => ServiceKind::Logging,
                ServiceArg::Metrics => ServiceKind::Metrics,
            })
            .collect();
        config = config.with_services(services);
    }
    if let Some(port) = args.logging_port {
        config = config.with_port(ServiceKind::Logging, port);
    }
    if let Some(port) = args.metrics_port {
        config = config.with_port(ServiceKind::Metrics, port);
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), HarnessError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let harness = Harness::start(harness_config(&args)).await?;
    harness.run().await
}
