//! Core type definitions using newtype patterns for type safety.

mod port;

pub use port::{Port, PortError, PortRange, PortSet, QUICK_SCAN_PORTS};
