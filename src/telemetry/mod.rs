//! Telemetry for the self-test.
//!
//! Structured logging only; output goes to stderr or a configured file.

mod logging;

pub use logging::{init_logging, LogConfig, LogError, LogFormat};
