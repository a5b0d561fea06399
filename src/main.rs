//! drivestat
//!
//! Prints drive health metrics in Prometheus text exposition format, for use
//! with a textfile collector or a script exporter.
//!
//! ```text
//! drivestat hpssacli    # RAID controller logical/physical drive status
//! drivestat smartctl    # SMART overall-health per sd* disk
//! ```
//!
//! Exit status is 0 on success, 2 when no disk supports SMART, 1 otherwise.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use drivestat::adapters::{DevDirectory, HpssacliCli, SmartctlCli, StaticDevices};
use drivestat::config::{
    HpssacliConfig, SmartctlConfig, DEFAULT_HPSSACLI_PATH, DEFAULT_SMARTCTL_PATH,
};
use drivestat::domain::DeviceSource;
use drivestat::metrics::{render, OutputFormat};
use drivestat::{export_controller, export_smart, Error, MetricRegistry};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Drive health exporter for hpssacli and smartctl
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, env = "DRIVESTAT_FORMAT", value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive status from an HP Smart Array controller
    Hpssacli {
        /// Path to the hpssacli binary
        #[arg(long, env = "HPSSACLI_PATH", default_value = DEFAULT_HPSSACLI_PATH)]
        binary: PathBuf,

        /// Metric name prefix
        #[arg(long, env = "HPSSACLI_NAMESPACE", default_value = "hpssacli")]
        namespace: String,
    },

    /// SMART overall-health self-assessment per disk
    Smartctl {
        /// Path to the smartctl binary
        #[arg(long, env = "SMARTCTL_PATH", default_value = DEFAULT_SMARTCTL_PATH)]
        binary: PathBuf,

        /// Metric name prefix
        #[arg(long, env = "SMARTCTL_NAMESPACE", default_value = "smartctl")]
        namespace: String,

        /// Directory scanned for sd* disk nodes
        #[arg(long, env = "DRIVESTAT_DEV_DIR", default_value = "/dev")]
        dev_dir: PathBuf,

        /// Probe only these devices (repeatable)
        #[arg(long = "device")]
        devices: Vec<String>,

        /// Number of disks probed at the same time
        #[arg(long, env = "DRIVESTAT_CONCURRENCY", default_value = "1")]
        concurrency: usize,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            let code = e.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let registry = match &args.command {
        Command::Hpssacli { binary, namespace } => {
            let config = HpssacliConfig {
                binary: binary.clone(),
                namespace: namespace.clone(),
            };
            let source = HpssacliCli::from_config(&config);
            export_controller(&source, &config)
                .await
                .context("collecting controller drive status")?
        }
        Command::Smartctl {
            binary,
            namespace,
            dev_dir,
            devices,
            concurrency,
        } => {
            let config = SmartctlConfig {
                binary: binary.clone(),
                namespace: namespace.clone(),
                device_dir: dev_dir.clone(),
                devices: devices.clone(),
                max_concurrent_probes: *concurrency,
            };
            run_smartctl(&config)
                .await
                .context("collecting SMART health")?
        }
    };

    let document = render(&registry, args.format).context("rendering metrics")?;
    debug!(bytes = document.len(), "Writing metrics document");

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .and_then(|_| stdout.flush())
        .context("writing metrics to stdout")?;

    Ok(())
}

async fn run_smartctl(config: &SmartctlConfig) -> drivestat::Result<MetricRegistry> {
    let probe = SmartctlCli::from_config(config);
    let devices: Box<dyn DeviceSource> = if config.devices.is_empty() {
        Box::new(DevDirectory::new(config.device_dir.clone()))
    } else {
        Box::new(StaticDevices::new(config.devices.clone()))
    };

    export_smart(devices.as_ref(), &probe, config).await
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the metrics document
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
