//! Plain text output formatting.
//!
//! Produces human-readable console output with colors and formatting.

use crate::report::ScanSession;
use crate::scanner::{ScanConfig, ScanOutcome};
use crate::types::PortSet;
use console::style;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Write the open-ports table and statistics summary.
pub fn write_session<W: Write>(out: &mut W, session: &ScanSession) -> io::Result<()> {
    write_open_ports(out, session)?;
    write_statistics(out, session)?;
    out.flush()
}

/// Write the open ports, ascending by port number.
pub fn write_open_ports<W: Write>(out: &mut W, session: &ScanSession) -> io::Result<()> {
    let open = session.open_ports();

    writeln!(out)?;
    if open.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
        return Ok(());
    }

    writeln!(out, "  {}", style("OPEN PORTS").bold())?;
    writeln!(out, "  {}", style("-".repeat(RULE_WIDTH)).dim())?;
    for outcome in &open {
        if outcome.is_identified() {
            writeln!(out, "  Port {}: {}", outcome.port, outcome.service)?;
        } else {
            writeln!(out, "  Port {}: unknown service", outcome.port)?;
        }
    }
    writeln!(out, "  {}", style("-".repeat(RULE_WIDTH)).dim())?;

    Ok(())
}

/// Write the one-shot statistics summary.
pub fn write_statistics<W: Write>(out: &mut W, session: &ScanSession) -> io::Result<()> {
    let stats = session.stats();
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", style(&rule).cyan())?;
    writeln!(out, " {}", style("SCAN STATISTICS").cyan().bold())?;
    writeln!(out, "{}", style(&rule).cyan())?;
    writeln!(
        out,
        "  Duration: {:.2} seconds",
        session.duration().as_secs_f64()
    )?;
    writeln!(out, "  Ports scanned: {}", stats.scanned)?;
    writeln!(out, "  Open ports: {}", style(stats.open).green().bold())?;
    writeln!(out, "  Closed ports: {}", style(stats.closed).red())?;
    writeln!(out, "  Services identified: {}", stats.identified)?;
    writeln!(out, "{}", style(&rule).cyan())?;

    Ok(())
}

/// Print a scan header before probing begins.
pub fn print_scan_header(config: &ScanConfig) {
    let stdout = io::stdout();
    let _ = write_scan_header(&mut stdout.lock(), config);
}

fn write_scan_header<W: Write>(out: &mut W, config: &ScanConfig) -> io::Result<()> {
    writeln!(out)?;
    match &config.ports {
        PortSet::Range(range) => writeln!(
            out,
            "{} Scanning {} from port {} to {} ({} ports)",
            style("•").dim(),
            style(&config.host).white().bold(),
            range.start(),
            range.end(),
            range.len()
        )?,
        PortSet::Quick => writeln!(
            out,
            "{} Quick scan of {} ({} common ports)",
            style("•").dim(),
            style(&config.host).white().bold(),
            config.ports.len()
        )?,
    }
    if !config.verbose {
        writeln!(out, "{} Scan in progress, please wait...", style("•").dim())?;
    }
    Ok(())
}

/// Write the line announcing a freshly discovered open port.
pub fn write_discovery<W: Write>(out: &mut W, outcome: &ScanOutcome) -> io::Result<()> {
    writeln!(out, "{} {}", style("✓").green().bold(), outcome)
}

/// Print an open port the moment it is discovered.
///
/// A closed or broken stdout is ignored; the outcome has already been
/// published by then.
pub fn print_discovery(outcome: &ScanOutcome) {
    let stdout = io::stdout();
    let _ = write_discovery(&mut stdout.lock(), outcome);
}

// The helpers below never panic on a closed stream, unlike `println!`.

/// Print an error message.
pub fn print_error(msg: &str) {
    let _ = writeln!(io::stderr(), "{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    let _ = writeln!(io::stderr(), "{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    let _ = writeln!(io::stdout(), "{} {}", style("✓").green().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, PortRange};
    use chrono::Local;
    use std::time::Duration;

    fn render<F>(session: &ScanSession, f: F) -> String
    where
        F: Fn(&mut Vec<u8>, &ScanSession) -> io::Result<()>,
    {
        console::set_colors_enabled(false);
        let mut buf = Vec::new();
        f(&mut buf, session).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_open_ports_table_sorted() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::ZERO,
            100,
            vec![
                ScanOutcome::open(Port::new(8080).unwrap()),
                ScanOutcome::open(Port::new(22).unwrap()),
                ScanOutcome::open(Port::new(40000).unwrap()),
            ],
        );

        let text = render(&session, |w, s| write_open_ports(w, s));
        let ssh = text.find("Port 22: SSH").unwrap();
        let proxy = text.find("Port 8080: HTTP Proxy/Alt").unwrap();
        let unknown = text.find("Port 40000: unknown service").unwrap();
        assert!(ssh < proxy && proxy < unknown);
    }

    #[test]
    fn test_no_open_ports() {
        let session = ScanSession::new("host", Local::now(), Duration::ZERO, 20, Vec::new());
        let text = render(&session, |w, s| write_open_ports(w, s));
        assert!(text.contains("No open ports found."));
    }

    #[test]
    fn test_statistics() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::from_millis(2500),
            6,
            vec![ScanOutcome::open(Port::new(22).unwrap())],
        );

        let text = render(&session, |w, s| write_statistics(w, s));
        assert!(text.contains("Duration: 2.50 seconds"));
        assert!(text.contains("Ports scanned: 6"));
        assert!(text.contains("Open ports: 1"));
        assert!(text.contains("Closed ports: 5"));
        assert!(text.contains("Services identified: 1"));
    }

    #[test]
    fn test_discovery_line() {
        console::set_colors_enabled(false);
        let mut buf = Vec::new();
        write_discovery(&mut buf, &ScanOutcome::open(Port::new(22).unwrap())).unwrap();
        write_discovery(&mut buf, &ScanOutcome::open(Port::new(40000).unwrap())).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "✓ Port 22 is open (SSH)\n✓ Port 40000 is open\n");
    }

    #[test]
    fn test_scan_header() {
        console::set_colors_enabled(false);
        let range = PortRange::new(Port::new(20).unwrap(), Port::new(25).unwrap()).unwrap();
        let mut buf = Vec::new();
        write_scan_header(&mut buf, &ScanConfig::new("10.0.0.1", PortSet::Range(range))).unwrap();
        write_scan_header(
            &mut buf,
            &ScanConfig::new("10.0.0.1", PortSet::Quick).with_verbose(true),
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Scanning 10.0.0.1 from port 20 to 25 (6 ports)"));
        assert!(text.contains("Quick scan of 10.0.0.1 (20 common ports)"));
        assert_eq!(text.matches("Scan in progress").count(), 1);
    }

    #[test]
    fn test_session_written_in_order() {
        let session = ScanSession::new(
            "host",
            Local::now(),
            Duration::ZERO,
            3,
            vec![ScanOutcome::open(Port::new(443).unwrap())],
        );

        let text = render(&session, |w, s| write_session(w, s));
        let table = text.find("Port 443: HTTPS").unwrap();
        let stats = text.find("SCAN STATISTICS").unwrap();
        assert!(table < stats);
        assert!(text.contains("Closed ports: 2"));
    }
}
