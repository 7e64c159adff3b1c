//! Console output.
//!
//! Styled terminal rendering of scan progress and results. The persisted
//! report lives in [`crate::report`].

mod plain;

pub use plain::{
    print_discovery, print_error, print_scan_header, print_success, print_warning,
    write_discovery, write_open_ports, write_session, write_statistics,
};
