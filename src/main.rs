//! lvminit CLI entrypoint.
//!
//! Loads the topology document, logs the node's visible block devices, and
//! dispatches to the create or destroy driving loop. Both loops run until
//! the process is stopped; fatal errors are logged and turn into a non-zero
//! exit status for the supervising orchestrator to act on.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use lvminit::config::{ConfigParser, Mode, TopologyConfig};
use lvminit::error::Result;
use lvminit::lvm::{CommandRunner, Lvm, StorageProber, SystemCommandRunner};
use lvminit::reconciler::{CreateReconciler, DestroyReconciler, ResizeMonitor, SizeSnapshot};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Interval between resize-monitor ticks in create mode.
const RESIZE_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Interval between teardown attempts in destroy mode.
const DESTROY_RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// lvminit - Declarative LVM volume-group provisioner.
#[derive(Parser, Debug)]
#[command(name = "lvminit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the topology configuration file.
    config: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error, exiting");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Records go to stderr as JSON, one object per line, so an orchestrator's
/// log pipeline can ingest them without a parsing step.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let parser = ConfigParser::new();
    let topology = parser.load_file(&cli.config)?;

    info!(
        mode = %topology.mode,
        volume_groups = topology.volume_groups.len(),
        devices = topology.device_count(),
        "Loaded topology"
    );

    // Purely diagnostic; reconciliation never consults this list.
    match lvminit::devices::scan_block_devices() {
        Ok(devices) => info!(devices = ?devices, "Available block devices"),
        Err(e) => warn!(error = %e, "Failed to scan /dev"),
    }

    let runner = SystemCommandRunner::new();
    let lvm = Lvm::new(&runner);
    let prober = StorageProber::new(&runner);

    match topology.mode {
        Mode::Create => run_create(&topology, &lvm, &prober).await,
        Mode::Destroy => run_destroy(&topology, &lvm, &prober).await,
    }
}

/// Create mode: reconcile once, then monitor for device growth forever.
async fn run_create<R: CommandRunner>(
    topology: &TopologyConfig,
    lvm: &Lvm<'_, R>,
    prober: &StorageProber<'_, R>,
) -> Result<()> {
    let reconciler = CreateReconciler::new(topology, lvm);
    let summary = reconciler.ensure_created().await?;
    info!(%summary, "Volume group setup completed");

    let monitor = ResizeMonitor::new(topology, lvm, prober);
    let mut sizes = SizeSnapshot::new();
    loop {
        tokio::time::sleep(RESIZE_CHECK_INTERVAL).await;
        sizes = monitor.tick(&sizes).await;
    }
}

/// Destroy mode: re-attempt teardown forever, in deadline-bounded bursts.
async fn run_destroy<R: CommandRunner>(
    topology: &TopologyConfig,
    lvm: &Lvm<'_, R>,
    prober: &StorageProber<'_, R>,
) -> Result<()> {
    let reconciler = DestroyReconciler::new(topology, lvm, prober);
    loop {
        let converged = reconciler.destroy_all().await;
        info!(converged, "Teardown pass completed");
        tokio::time::sleep(DESTROY_RETRY_INTERVAL).await;
    }
}
