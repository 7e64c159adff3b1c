//! Service detection based on well-known port numbers.
//!
//! Provides mapping from port numbers to likely service names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label reported for ports missing from the table.
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // File transfer and remote access
    m.insert(20, "FTP (Data)");
    m.insert(21, "FTP (Control)");
    m.insert(22, "SSH");
    m.insert(23, "Telnet (unencrypted)");
    m.insert(69, "TFTP");
    m.insert(1723, "PPTP VPN");
    m.insert(3389, "RDP (Remote Desktop)");
    m.insert(5900, "VNC");

    // Mail
    m.insert(25, "SMTP");
    m.insert(110, "POP3");
    m.insert(143, "IMAP");
    m.insert(465, "SMTPS");
    m.insert(587, "SMTP (Submission)");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");

    // Infrastructure
    m.insert(53, "DNS");
    m.insert(67, "DHCP");
    m.insert(68, "DHCP");
    m.insert(123, "NTP");
    m.insert(161, "SNMP");
    m.insert(162, "SNMP");
    m.insert(389, "LDAP");
    m.insert(445, "SMB");
    m.insert(514, "Syslog");
    m.insert(636, "LDAPS");

    // Web
    m.insert(80, "HTTP");
    m.insert(443, "HTTPS");
    m.insert(3000, "Node.js/React Dev");
    m.insert(5000, "Flask/Python Dev");
    m.insert(8000, "HTTP Alt (Dev)");
    m.insert(8080, "HTTP Proxy/Alt");
    m.insert(8443, "HTTPS Alt");
    m.insert(9000, "SonarQube");

    // Databases
    m.insert(1433, "MS SQL Server");
    m.insert(1521, "Oracle DB");
    m.insert(3306, "MySQL");
    m.insert(5432, "PostgreSQL");
    m.insert(6379, "Redis");
    m.insert(27017, "MongoDB");

    m
});

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Get the service label for a port, or [`UNKNOWN_SERVICE`].
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or(UNKNOWN_SERVICE)
}

/// Whether a label names a recognized service.
pub fn is_known(label: &str) -> bool {
    label != UNKNOWN_SERVICE
}
