//! Configuration management for portsweep.
//!
//! Provides XDG-compliant settings storage. Settings are read once at
//! startup and folded into a [`crate::scanner::ScanConfig`].

mod settings;

pub use settings::{AppSettings, Paths};
