//! Scan command implementation.
//!
//! Resolves the scan parameters from flags, settings and prompts, then runs
//! the dispatcher and hands the session to the report views.

use super::prompt::{prompt_host, prompt_port};
use crate::config::AppSettings;
use crate::error::{CliResult, ScanError};
use crate::output;
use crate::report::{write_report, ScanSession};
use crate::scanner::{run_scan, ScanConfig, TcpConnectProber};
use crate::types::{Port, PortRange, PortSet};
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Scan a target for open TCP ports.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanCommand {
    /// Target IP address or hostname (prompted when omitted)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// First port of the range (prompted when omitted)
    #[arg(long, value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub start: Option<u16>,

    /// Last port of the range (prompted when omitted)
    #[arg(long, value_name = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub end: Option<u16>,

    /// Scan a short list of common ports instead of a range
    #[arg(long)]
    pub quick: bool,

    /// Print open ports as they are found and record closed ports
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum number of concurrent connection attempts [default: 500]
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Write a plain-text report to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        let config = {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut stdout = io::stdout();
            self.resolve_config(settings, &mut input, &mut stdout)?
        };

        output::print_scan_header(&config);

        let prober = Arc::new(TcpConnectProber::new(config.host.clone()));
        let session = run_scan(prober, &config).await?;

        self.present(&session, &mut io::stdout().lock());
        output::print_success("Scan complete!");
        Ok(())
    }

    /// Show the session on `out` and save the report.
    ///
    /// A console write failure only warns; the report is still written.
    pub fn present<W: Write>(&self, session: &ScanSession, out: &mut W) {
        if let Err(e) = output::write_session(out, session) {
            warn!(error = %e, "results not shown");
            output::print_warning(&format!("could not print results: {}", e));
        }
        self.save_report(session);
    }

    /// Build the scan configuration, prompting for anything not given.
    ///
    /// An inverted range is rejected here, before any probe exists.
    pub fn resolve_config<R: BufRead, W: Write>(
        &self,
        settings: &AppSettings,
        input: &mut R,
        out: &mut W,
    ) -> CliResult<ScanConfig> {
        let host = match &self.host {
            Some(host) if !host.trim().is_empty() => host.trim().to_string(),
            _ => prompt_host(input, out)?,
        };

        let ports = if self.quick {
            PortSet::Quick
        } else {
            let start = match self.start.and_then(Port::new) {
                Some(port) => port,
                None => prompt_port(input, out, "start port")?,
            };
            let end = match self.end.and_then(Port::new) {
                Some(port) => port,
                None => prompt_port(input, out, "end port")?,
            };
            let range = PortRange::new(start, end).map_err(|_| ScanError::InvalidRange {
                start: start.as_u16(),
                end: end.as_u16(),
            })?;
            PortSet::Range(range)
        };

        let config = ScanConfig::new(host, ports)
            .with_concurrency(self.concurrency.unwrap_or(settings.default_concurrency))
            .with_verbose(self.verbose || settings.verbose)
            .with_progress(settings.progress_bar);
        config.validate()?;

        info!(
            host = %config.host,
            ports = %config.ports,
            concurrency = config.concurrency,
            verbose = config.verbose,
            "scan configured"
        );
        Ok(config)
    }

    /// Write the report if one was requested. Failures only warn.
    fn save_report(&self, session: &ScanSession) {
        let Some(path) = &self.output else {
            return;
        };

        match write_report(path, session) {
            Ok(()) => output::print_success(&format!("Results saved to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "report not saved");
                output::print_warning(&format!("could not save results: {}", e));
            }
        }
    }
}
