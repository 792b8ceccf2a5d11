//! Shared utilities for the ballot ledger workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
