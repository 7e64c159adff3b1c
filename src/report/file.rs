//! Persisted plain-text report.
//!
//! One line per open port followed by an open/scanned trailer.

use super::ScanSession;
use crate::error::{ReportError, ReportResult};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Render the report body for a session.
pub fn render_report(session: &ScanSession) -> String {
    let stats = session.stats();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "=== Scan results for {} ===", session.host());
    let _ = writeln!(
        out,
        "Date: {}",
        session.started_at().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);

    for outcome in session.open_ports() {
        if outcome.is_identified() {
            let _ = writeln!(out, "Port {}: OUVERT - {}", outcome.port, outcome.service);
        } else {
            let _ = writeln!(out, "Port {}: OUVERT", outcome.port);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total open ports: {} of {} scanned",
        stats.open, stats.scanned
    );

    out
}

/// Write the report for `session` to `path`, replacing any existing file.
pub fn write_report(path: &Path, session: &ScanSession) -> ReportResult<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(render_report(session).as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "report written");
    Ok(())
}
