//! Port types with validation.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is an inclusive, non-empty range and `PortSet` is the set of
//! ports a single dispatch run probes.

use std::fmt;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value as u32))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl std::str::FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u32 = s
            .parse()
            .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
        u16::try_from(value)
            .ok()
            .and_then(Port::new)
            .ok_or(PortError::OutOfRange(value))
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: {0:?}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
}

/// A range of ports (inclusive, never empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range. Fails when `start > end`.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// Check if the range is empty (never true for valid ranges).
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Ports probed by the quick scan.
pub const QUICK_SCAN_PORTS: [u16; 20] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 445, 465, 587, 993, 995, 1433, 3306, 3389, 5432,
    8080, 8443,
];

/// The ports one dispatch run probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSet {
    /// A contiguous inclusive range.
    Range(PortRange),
    /// The curated quick-scan list.
    Quick,
}

impl PortSet {
    /// Number of probes this set produces.
    pub fn len(&self) -> usize {
        match self {
            Self::Range(range) => range.len(),
            Self::Quick => QUICK_SCAN_PORTS.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All ports in the set, in enumeration order.
    pub fn to_ports(&self) -> Vec<Port> {
        match self {
            Self::Range(range) => range.iter().collect(),
            Self::Quick => QUICK_SCAN_PORTS.iter().filter_map(|&p| Port::new(p)).collect(),
        }
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(range) => write!(f, "{}", range),
            Self::Quick => write!(f, "quick ({} common ports)", QUICK_SCAN_PORTS.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_port_from_str() {
        assert_eq!("22".parse::<Port>().unwrap().as_u16(), 22);
        assert_eq!(" 443 \n".parse::<Port>().unwrap().as_u16(), 443);
        assert_eq!("0".parse::<Port>(), Err(PortError::OutOfRange(0)));
        assert_eq!("70000".parse::<Port>(), Err(PortError::OutOfRange(70000)));
        assert!(matches!("ssh".parse::<Port>(), Err(PortError::InvalidFormat(_))));
        assert!(matches!("".parse::<Port>(), Err(PortError::InvalidFormat(_))));
    }

    #[test]
    fn test_port_range() {
        let range = PortRange::new(Port::new(20).unwrap(), Port::new(25).unwrap()).unwrap();
        assert_eq!(range.len(), 6);
        assert_eq!(
            range.iter().map(u16::from).collect::<Vec<_>>(),
            vec![20, 21, 22, 23, 24, 25]
        );
        assert_eq!(range.to_string(), "20-25");
    }

    #[test]
    fn test_single_port_range() {
        let port = Port::new(8080).unwrap();
        let range = PortRange::new(port, port).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_string(), "8080");
    }

    #[test]
    fn test_full_range_len() {
        let range = PortRange::new(Port::new(1).unwrap(), Port::new(65535).unwrap()).unwrap();
        assert_eq!(range.len(), 65535);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = PortRange::new(Port::new(100).unwrap(), Port::new(50).unwrap());
        assert_eq!(result, Err(PortError::InvalidRange(100, 50)));
    }

    #[test]
    fn test_quick_set() {
        let ports = PortSet::Quick.to_ports();
        assert_eq!(ports.len(), 20);
        assert_eq!(PortSet::Quick.len(), 20);
        assert!(ports.iter().any(|p| p.as_u16() == 22));
    }
}
