//! Logger initialization.
//!
//! The crate itself only logs through the `log` facade; this module wires
//! the facade to `env_logger` for hosts that have no logger of their own.
//! Embedding applications with an existing logger should skip it entirely.

mod init;

pub use init::{LoggingConfig, init_logging};
