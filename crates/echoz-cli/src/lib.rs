//! echoz-cli
//!
//! Config-directory handling and document I/O behind the `echoz` binary.

pub mod config;
pub mod io;
pub mod measurements;
