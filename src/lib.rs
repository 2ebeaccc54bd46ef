//! OpenSSL self-test.
//!
//! Verifies that the linked OpenSSL library is installed and minimally
//! functional, the way a package test would after a build.
//!
//! # Checks
//!
//! - **Version**: the library reports a non-empty version string
//! - **Initialization**: global state (error strings, algorithm tables) loads
//! - **Random bytes**: 16 bytes of strong randomness can be generated
//! - **Digest context**: a digest context can be allocated and freed
//!
//! Results go to stdout as a fixed transcript; the process exits 0 when every
//! check passes and 1 on the first failure. Diagnostics go through `tracing`.

pub mod backend;
pub mod config;
pub mod selftest;
pub mod telemetry;

pub use backend::{BackendError, CryptoBackend, MockBackend, OpenSslBackend};
pub use selftest::{run, SelfTestError, SelfTestReport};
