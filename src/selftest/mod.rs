// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! OpenSSL smoke test.
//!
//! Runs a fixed sequence of checks against a [`CryptoBackend`]:
//! - Version query
//! - Library initialization
//! - Random byte generation (16 bytes)
//! - Digest context allocation and release
//! - Global cleanup
//!
//! The first failing check prints `FAILED` and ends the run. Global cleanup is
//! tied to a [`LibraryGuard`], so it also runs when a later check fails.

mod error;
mod guard;
mod report;

pub use error::{SelfTestError, FAILURE_EXIT_CODE};
pub use guard::LibraryGuard;
pub use report::{SelfTestReport, Step, StepOutcome, StepRecord};

use std::io::Write;

use tracing::warn;

use crate::backend::CryptoBackend;

/// Size of the scratch buffer handed to the random generator.
pub const RANDOM_BUFFER_LEN: usize = 16;

pub const BANNER: &str = "OpenSSL Test Package";
pub const BANNER_RULE: &str = "===================";
pub const VERSION_LABEL: &str = "OpenSSL Version";
pub const INIT_OK: &str = "SSL library initialized successfully";
pub const INIT_FAILED: &str = "SSL library initialization: FAILED";
pub const RANDOM_LABEL: &str = "Random number generation";
pub const DIGEST_LABEL: &str = "Crypto context creation";
pub const ALL_PASSED: &str = "All tests passed! OpenSSL package is working correctly.";

/// Run every check against `backend`, writing the transcript to `out`.
///
/// The returned report is also emitted as a log event, on both paths.
pub fn run<B, W>(backend: &B, out: &mut W) -> Result<SelfTestReport, SelfTestError>
where
    B: CryptoBackend,
    W: Write,
{
    let mut report = SelfTestReport::default();
    let result = run_checks(backend, out, &mut report);
    report.passed = result.is_ok();
    report.emit();
    result.map(|()| report)
}

fn run_checks<B, W>(
    backend: &B,
    out: &mut W,
    report: &mut SelfTestReport,
) -> Result<(), SelfTestError>
where
    B: CryptoBackend,
    W: Write,
{
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{BANNER_RULE}")?;

    match report.record(Step::Version, || backend.version()) {
        Ok(version) => {
            writeln!(out, "{VERSION_LABEL}: {version}")?;
            report.version = Some(version);
        }
        Err(e) => {
            writeln!(out, "{VERSION_LABEL}: FAILED")?;
            return Err(SelfTestError::VersionUnavailable(e));
        }
    }

    let guard = match report.record(Step::Init, || LibraryGuard::acquire(backend)) {
        Ok(guard) => {
            writeln!(out, "{INIT_OK}")?;
            guard
        }
        Err(e) => {
            writeln!(out, "{INIT_FAILED}")?;
            return Err(SelfTestError::InitFailed(e));
        }
    };

    let mut random = [0u8; RANDOM_BUFFER_LEN];
    if let Err(e) = report.record(Step::RandomBytes, || backend.random_bytes(&mut random)) {
        writeln!(out, "{RANDOM_LABEL}: FAILED")?;
        return Err(SelfTestError::RandomUnavailable(e));
    }
    writeln!(out, "{RANDOM_LABEL}: OK")?;

    match report.record(Step::DigestContext, || backend.new_digest_context()) {
        Ok(ctx) => {
            writeln!(out, "{DIGEST_LABEL}: OK")?;
            drop(ctx);
        }
        Err(e) => {
            writeln!(out, "{DIGEST_LABEL}: FAILED")?;
            return Err(SelfTestError::DigestContextUnavailable(e));
        }
    }

    // Checks already passed; a cleanup failure is logged, not fatal.
    if let Err(e) = report.record(Step::Cleanup, || guard.release()) {
        warn!(error = %e, "continuing after cleanup failure");
    }

    writeln!(out)?;
    writeln!(out, "{ALL_PASSED}")?;
    out.flush()?;
    Ok(())
}
