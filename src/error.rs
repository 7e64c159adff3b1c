//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Connection failures are
//! deliberately absent: a failed connect is a closed port, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a scan before any probe is launched.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("start port ({start}) must be less than or equal to end port ({end})")]
    InvalidRange { start: u16, end: u16 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("admission gate closed unexpectedly")]
    GateClosed,
}

/// Errors raised while writing the persisted report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot create report file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Errors from interactive prompting.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("standard input closed before a value was entered")]
    Eof,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the command-line front door.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Result type alias for scan setup.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for report writing.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for the front door.
pub type CliResult<T> = Result<T, CliError>;
