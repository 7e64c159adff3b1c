//! # portsweep - a bounded-concurrency TCP port scanner
//!
//! portsweep probes one host across a range of TCP ports, labels open ports
//! with a best-guess service name and reports aggregate statistics.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanConfig, TcpConnectProber};
//! use portsweep::types::{Port, PortRange, PortSet};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let range = PortRange::new(Port::new(1).unwrap(), Port::new(1024).unwrap()).unwrap();
//!     let config = ScanConfig::new("127.0.0.1", PortSet::Range(range)).with_concurrency(200);
//!     let prober = Arc::new(TcpConnectProber::new("127.0.0.1"));
//!
//!     let session = run_scan(prober, &config).await.unwrap();
//!     for outcome in session.open_ports() {
//!         println!("{}", outcome);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`services`] - port to service-name lookup
//! - [`scanner`] - connection probes and the dispatcher
//! - [`report`] - result aggregation and the persisted report
//! - [`output`] - console rendering
//! - [`cli`] - argument parsing and interactive prompts
//! - [`config`] - settings file
//! - [`error`] - error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ReportError, ScanError};
pub use report::{ScanSession, ScanStats};
pub use scanner::{dispatch, run_scan, Prober, ScanConfig, ScanOutcome, TcpConnectProber};
pub use types::{Port, PortRange, PortSet};
