//! openssl-selftest entry point.
//!
//! Takes no arguments. Prints the self-test transcript to stdout and exits
//! 0 when every check passes, 1 otherwise.

use std::process::ExitCode;

use openssl_selftest::config;
use openssl_selftest::selftest;
use openssl_selftest::telemetry::init_logging;
use openssl_selftest::OpenSslBackend;

fn main() -> ExitCode {
    let config = config::load();
    if let Err(e) = init_logging(&config.log) {
        eprintln!("Logging disabled: {}", e);
    }

    let backend = OpenSslBackend::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match selftest::run(&backend, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, step = ?e.step(), "self-test failed");
            ExitCode::from(e.exit_code())
        }
    }
}
