//! Logging utilities.
//!
//! The library only emits through the `log` facade. This module is for
//! binaries and tests that want an `env_logger` sink without repeating the
//! setup.

mod init;

pub use init::{init_logging, LoggingConfig, LOG_ENV};
