//! Result aggregation.
//!
//! Drains the dispatcher's outcome sink into a [`ScanSession`] and derives
//! the statistics every report view is built from.

mod file;

pub use file::{render_report, write_report};

use crate::scanner::{Dispatch, ScanOutcome};
use chrono::{DateTime, Local};
use std::time::Duration;
use tracing::debug;

/// Aggregate counts for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Ports probed (always the number of probes launched).
    pub scanned: usize,
    /// Ports that accepted a connection.
    pub open: usize,
    /// `scanned - open`.
    pub closed: usize,
    /// Open ports with a recognized service.
    pub identified: usize,
}

/// Everything produced by one run, owned by the aggregator.
#[derive(Debug, Clone)]
pub struct ScanSession {
    host: String,
    started_at: DateTime<Local>,
    duration: Duration,
    launched: usize,
    outcomes: Vec<ScanOutcome>,
}

impl ScanSession {
    /// Build a session from already-collected outcomes.
    pub fn new(
        host: impl Into<String>,
        started_at: DateTime<Local>,
        duration: Duration,
        launched: usize,
        outcomes: Vec<ScanOutcome>,
    ) -> Self {
        Self {
            host: host.into(),
            started_at,
            duration,
            launched,
            outcomes,
        }
    }

    /// Drain a finished dispatch into a session.
    pub async fn collect(
        host: String,
        started_at: DateTime<Local>,
        duration: Duration,
        mut dispatch: Dispatch,
    ) -> Self {
        let mut outcomes = Vec::new();
        while let Some(outcome) = dispatch.outcomes.recv().await {
            outcomes.push(outcome);
        }

        debug!(
            received = outcomes.len(),
            launched = dispatch.launched,
            "outcome sink drained"
        );

        Self::new(host, started_at, duration, dispatch.launched, outcomes)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Wall-clock duration of the dispatch phase.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of probes launched.
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Outcomes in arrival order.
    pub fn outcomes(&self) -> &[ScanOutcome] {
        &self.outcomes
    }

    /// Open outcomes sorted ascending by port.
    pub fn open_ports(&self) -> Vec<ScanOutcome> {
        let mut open: Vec<ScanOutcome> = self.outcomes.iter().filter(|o| o.open).copied().collect();
        open.sort_by_key(|o| o.port);
        open
    }

    /// Compute the aggregate counts.
    pub fn stats(&self) -> ScanStats {
        let open = self.outcomes.iter().filter(|o| o.open).count();
        let identified = self.outcomes.iter().filter(|o| o.is_identified()).count();
        // Closed outcomes only reach the sink in verbose mode; the launch
        // count is the true number of ports scanned either way.
        let scanned = self.launched.max(self.outcomes.len());

        ScanStats {
            scanned,
            open,
            closed: scanned - open,
            identified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    fn outcome(port: u16, open: bool) -> ScanOutcome {
        let port = Port::new(port).unwrap();
        if open {
            ScanOutcome::open(port)
        } else {
            ScanOutcome::closed(port)
        }
    }

    #[test]
    fn test_open_ports_sorted() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::ZERO,
            5,
            vec![outcome(443, true), outcome(22, true), outcome(80, true)],
        );

        let ports: Vec<u16> = session.open_ports().iter().map(|o| o.port.as_u16()).collect();
        assert_eq!(ports, vec![22, 80, 443]);
    }

    #[test]
    fn test_stats_default_mode() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::ZERO,
            6,
            vec![outcome(22, true)],
        );

        assert_eq!(
            session.stats(),
            ScanStats {
                scanned: 6,
                open: 1,
                closed: 5,
                identified: 1
            }
        );
    }

    #[test]
    fn test_stats_verbose_mode() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::ZERO,
            3,
            vec![outcome(22, false), outcome(31337, true), outcome(80, true)],
        );

        let stats = session.stats();
        assert_eq!(stats.scanned, 3);
        assert_eq!(stats.open, 2);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.identified, 1);
    }

    #[test]
    fn test_empty_session() {
        let session = ScanSession::new("host", Local::now(), Duration::ZERO, 20, Vec::new());
        assert!(session.open_ports().is_empty());
        assert_eq!(session.stats().scanned, 20);
        assert_eq!(session.stats().closed, 20);
    }
}
