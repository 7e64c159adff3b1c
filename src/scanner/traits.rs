//! Prober trait abstraction.
//!
//! Defines the per-port probe interface the dispatcher drives, so the
//! dispatcher can be exercised against scripted hosts in tests.

use crate::services::{self, UNKNOWN_SERVICE};
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;

/// Result of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The port number that was probed.
    pub port: Port,
    /// Whether a connection was accepted.
    pub open: bool,
    /// Service label; only meaningful when `open` is true.
    pub service: &'static str,
}

impl ScanOutcome {
    /// An open port, labelled by the port classifier.
    pub fn open(port: Port) -> Self {
        Self {
            port,
            open: true,
            service: services::service_label(port.as_u16()),
        }
    }

    /// A closed, filtered or unreachable port.
    pub fn closed(port: Port) -> Self {
        Self {
            port,
            open: false,
            service: UNKNOWN_SERVICE,
        }
    }

    /// Whether the open port maps to a recognized service.
    pub fn is_identified(&self) -> bool {
        self.open && services::is_known(self.service)
    }
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.open, self.is_identified()) {
            (true, true) => write!(f, "Port {} is open ({})", self.port, self.service),
            (true, false) => write!(f, "Port {} is open", self.port),
            (false, _) => write!(f, "Port {} is closed", self.port),
        }
    }
}

/// Trait for single-port probe implementations.
///
/// A probe never fails: every connection problem is folded into a closed
/// outcome.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe one port on the target.
    async fn probe(&self, port: Port) -> ScanOutcome;

    /// Host this prober targets, as given by the user.
    fn host(&self) -> &str;
}
