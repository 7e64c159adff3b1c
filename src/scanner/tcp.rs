//! TCP Connect probe implementation.
//!
//! Performs a bare TCP connect using the operating system's socket API.
//! Nothing is read or written; the stream is dropped as soon as the
//! handshake completes.

use crate::scanner::traits::{Prober, ScanOutcome};
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Fixed connect timeout applied to every probe.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect prober.
///
/// The host may be an IP literal or a hostname; name resolution happens
/// inside the connect attempt and counts against the timeout.
pub struct TcpConnectProber {
    host: String,
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a prober for `host` using [`CONNECT_TIMEOUT`].
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_timeout(host, CONNECT_TIMEOUT)
    }

    /// Create a prober with a custom timeout.
    pub fn with_timeout(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> ScanOutcome {
        let addr = (self.host.as_str(), port.as_u16());

        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ScanOutcome::open(port)
            }
            Ok(Err(e)) => {
                trace!(host = %self.host, %port, error = %e, "connect failed");
                ScanOutcome::closed(port)
            }
            Err(_) => {
                trace!(host = %self.host, %port, "connect timed out");
                ScanOutcome::closed(port)
            }
        }
    }

    fn host(&self) -> &str {
        &self.host
    }
}
