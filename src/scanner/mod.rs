//! Scanner module: the bounded-concurrency scan dispatcher.
//!
//! One tokio task is spawned per port. An [`AdmissionGate`] caps how many
//! tasks are in flight, every outcome goes through a single MPSC sink sized
//! to the task count, and the sink is only closed after every task has been
//! joined.

pub mod gate;
pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::output;
use crate::report::ScanSession;
use crate::types::PortSet;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

pub use gate::{AdmissionGate, Slot};
pub use tcp::{TcpConnectProber, CONNECT_TIMEOUT};
pub use traits::{Prober, ScanOutcome};

/// Default concurrency ceiling.
pub const DEFAULT_CONCURRENCY: usize = 500;

/// Configuration for one dispatch run.
///
/// Built once by the front door and only read afterwards.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target host (IP literal or hostname).
    pub host: String,
    /// Ports to probe.
    pub ports: PortSet,
    /// Maximum number of probes in flight.
    pub concurrency: usize,
    /// Print discoveries as they happen and record closed ports.
    pub verbose: bool,
    /// Show a progress bar while probing (ignored when verbose).
    pub progress: bool,
}

impl ScanConfig {
    /// Create a configuration with default concurrency and no output.
    pub fn new(host: impl Into<String>, ports: PortSet) -> Self {
        Self {
            host: host.into(),
            ports,
            concurrency: DEFAULT_CONCURRENCY,
            verbose: false,
            progress: false,
        }
    }

    /// Set the concurrency ceiling.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enable verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Reject configurations that cannot be dispatched.
    pub fn validate(&self) -> ScanResult<()> {
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ScanError::InvalidConfig("target host is empty".to_string()));
        }
        Ok(())
    }
}

/// The finished dispatch phase.
///
/// `outcomes` is closed: every sender has been dropped, so draining it
/// terminates.
pub struct Dispatch {
    /// Number of probes launched.
    pub launched: usize,
    /// Probe tasks that panicked instead of reporting.
    pub failed: usize,
    /// Highest number of probes observed in flight at once.
    pub peak_in_flight: usize,
    /// Sink holding every published outcome.
    pub outcomes: mpsc::Receiver<ScanOutcome>,
}

/// Called with each open outcome in verbose mode, after it reached the sink.
pub type DiscoveryHook = Arc<dyn Fn(&ScanOutcome) + Send + Sync>;

/// Probe every port in `config.ports` and wait for all probes to finish.
///
/// Verbose discoveries are printed to stdout.
pub async fn dispatch<P>(prober: Arc<P>, config: &ScanConfig) -> ScanResult<Dispatch>
where
    P: Prober + ?Sized + 'static,
{
    dispatch_with(prober, config, Arc::new(output::print_discovery)).await
}

/// Like [`dispatch`], with a caller-supplied discovery hook.
pub async fn dispatch_with<P>(
    prober: Arc<P>,
    config: &ScanConfig,
    on_discovery: DiscoveryHook,
) -> ScanResult<Dispatch>
where
    P: Prober + ?Sized + 'static,
{
    config.validate()?;

    let ports = config.ports.to_ports();
    let gate = AdmissionGate::new(config.concurrency);
    let (tx, rx) = mpsc::channel(ports.len().max(1));
    let progress = progress_bar(config, ports.len());
    let mut tasks = JoinSet::new();
    let mut launched = 0;
    let mut failed = 0;

    debug!(
        host = prober.host(),
        ports = %config.ports,
        count = ports.len(),
        concurrency = config.concurrency,
        "dispatch started"
    );

    for port in ports {
        let slot = gate.acquire().await.map_err(|_| ScanError::GateClosed)?;
        let prober = Arc::clone(&prober);
        let tx = tx.clone();
        let progress = progress.clone();
        let on_discovery = Arc::clone(&on_discovery);
        let verbose = config.verbose;

        tasks.spawn(async move {
            let outcome = prober.probe(port).await;

            if (outcome.open || verbose) && tx.send(outcome).await.is_err() {
                warn!(%port, "outcome sink closed early");
            }
            if outcome.open && verbose {
                on_discovery(&outcome);
            }
            if let Some(pb) = progress {
                pb.inc(1);
            }

            drop(slot);
        });
        launched += 1;

        // Keep the set at most `concurrency` tasks deep.
        while let Some(joined) = tasks.try_join_next() {
            failed += count_failure(joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        failed += count_failure(joined);
    }

    // Every producer is done; closing our sender closes the sink.
    drop(tx);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    debug!(launched, failed, peak = gate.peak(), "dispatch finished");

    Ok(Dispatch {
        launched,
        failed,
        peak_in_flight: gate.peak(),
        outcomes: rx,
    })
}

fn count_failure(joined: Result<(), JoinError>) -> usize {
    match joined {
        Ok(()) => 0,
        Err(e) => {
            warn!(error = %e, "probe task did not complete");
            1
        }
    }
}

/// Dispatch a scan and aggregate its outcomes into a session.
pub async fn run_scan<P>(prober: Arc<P>, config: &ScanConfig) -> ScanResult<ScanSession>
where
    P: Prober + ?Sized + 'static,
{
    let started_at = Local::now();
    let start = Instant::now();

    let dispatch = dispatch(prober, config).await?;
    let duration = start.elapsed();

    Ok(ScanSession::collect(config.host.clone(), started_at, duration, dispatch).await)
}

fn progress_bar(config: &ScanConfig, total: usize) -> Option<ProgressBar> {
    if !config.progress || config.verbose {
        return None;
    }

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");

    Some(ProgressBar::new(total as u64).with_style(style))
}
