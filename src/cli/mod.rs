//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. Everything
//! read here is frozen into a [`crate::scanner::ScanConfig`] before the
//! dispatcher starts.

mod prompt;
mod scan;

pub use prompt::{prompt_host, prompt_port};
pub use scan::ScanCommand;

use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// portsweep - a bounded-concurrency TCP port scanner.
///
/// Probes a range of TCP ports (or a short list of common ports) on one host
/// and reports which ones accept connections.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A fast TCP connect port scanner", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Path to a custom settings file
    #[arg(long, value_name = "PATH", env = "PORTSWEEP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load settings, falling back to defaults when the file is unusable.
    pub fn settings(&self) -> AppSettings {
        let loaded = match &self.config {
            Some(path) => AppSettings::load_from(path),
            None => AppSettings::load(),
        };

        loaded.unwrap_or_else(|e| {
            warn!(error = %e, "settings not loaded");
            output::print_warning(&format!("ignoring settings: {}", e));
            AppSettings::default()
        })
    }

    /// Whether to log verbosely, from the flag or the settings file.
    pub fn verbose(&self, settings: &AppSettings) -> bool {
        self.scan.verbose || settings.verbose
    }

    /// Run the scan described by these arguments.
    pub async fn run(&self, settings: &AppSettings) -> CliResult<()> {
        self.scan.execute(settings).await
    }
}

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "portsweep=debug"
    } else {
        "warn"
    }
}

/// Process exit status for a finished run.
///
/// Only a rejected configuration or unreadable input fails the process.
pub fn exit_status(result: &CliResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(CliError::Scan(_) | CliError::Prompt(_)) => 1,
    }
}
