use portsweep::cli::ScanCommand;
use portsweep::config::AppSettings;
use portsweep::scanner::{run_scan, ScanConfig, TcpConnectProber};
use portsweep::types::{Port, PortRange, PortSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

async fn listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn finds_listening_loopback_port() {
    let (_open, open_port) = listener().await;
    let (closed, closed_port) = listener().await;
    drop(closed);

    let ports = [open_port, closed_port];
    let (lo, hi) = (*ports.iter().min().unwrap(), *ports.iter().max().unwrap());
    let range = PortRange::new(Port::new(lo).unwrap(), Port::new(hi).unwrap()).unwrap();

    // Keep the range small so the test stays fast even if the kernel hands
    // out distant ephemeral ports.
    if range.len() > 2000 {
        return;
    }

    let config = ScanConfig::new("127.0.0.1", PortSet::Range(range)).with_concurrency(256);
    let prober = Arc::new(TcpConnectProber::with_timeout(
        "127.0.0.1",
        Duration::from_millis(300),
    ));
    let session = run_scan(prober, &config).await.unwrap();

    let open: Vec<u16> = session.open_ports().iter().map(|o| o.port.as_u16()).collect();
    assert!(open.contains(&open_port));
    assert!(!open.contains(&closed_port));
    assert_eq!(session.stats().scanned, range.len());
}

#[tokio::test]
async fn scan_command_survives_unwritable_report() {
    let (_open, port) = listener().await;
    let dir = tempfile::tempdir().unwrap();

    let cmd = ScanCommand {
        host: Some("127.0.0.1".into()),
        start: Some(port),
        end: Some(port),
        concurrency: Some(4),
        output: Some(dir.path().join("missing").join("report.txt")),
        ..Default::default()
    };
    let settings = AppSettings {
        progress_bar: false,
        ..AppSettings::default()
    };

    cmd.execute(&settings).await.expect("report failure is not fatal");
}

#[tokio::test]
async fn scan_command_writes_report() {
    let (_open, port) = listener().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");

    let cmd = ScanCommand {
        host: Some("127.0.0.1".into()),
        start: Some(port),
        end: Some(port),
        output: Some(path.clone()),
        ..Default::default()
    };
    let settings = AppSettings {
        progress_bar: false,
        ..AppSettings::default()
    };

    cmd.execute(&settings).await.unwrap();

    let report = std::fs::read_to_string(&path).unwrap();
    assert!(report.starts_with("=== Scan results for 127.0.0.1 ==="));
    assert!(report.contains(&format!("Port {}: OUVERT", port)));
    assert!(report.ends_with("Total open ports: 1 of 1 scanned\n"));
}
