// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Self-test error types.
//!
//! Every failure is terminal for the run and maps to the same exit status.

use thiserror::Error;

use super::report::Step;
use crate::backend::BackendError;

/// Exit status reported for any failed run.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// Errors that end a self-test run.
#[derive(Debug, Error)]
pub enum SelfTestError {
    #[error("library version unavailable: {0}")]
    VersionUnavailable(#[source] BackendError),

    #[error("library initialization failed: {0}")]
    InitFailed(#[source] BackendError),

    #[error("random number generation failed: {0}")]
    RandomUnavailable(#[source] BackendError),

    #[error("digest context creation failed: {0}")]
    DigestContextUnavailable(#[source] BackendError),

    #[error("failed to write transcript: {0}")]
    Output(#[from] std::io::Error),
}

impl SelfTestError {
    /// Process exit status for this failure. Failure kinds are not distinguished.
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// The check that failed, if the failure came from a check.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::VersionUnavailable(_) => Some(Step::Version),
            Self::InitFailed(_) => Some(Step::Init),
            Self::RandomUnavailable(_) => Some(Step::RandomBytes),
            Self::DigestContextUnavailable(_) => Some(Step::DigestContext),
            Self::Output(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_exits_one() {
        let errors = [
            SelfTestError::VersionUnavailable(BackendError::EmptyVersion),
            SelfTestError::InitFailed(BackendError::InitErrors("x".into())),
            SelfTestError::RandomUnavailable(BackendError::Library("x".into())),
            SelfTestError::DigestContextUnavailable(BackendError::NullHandle("EVP_MD_CTX_new")),
            SelfTestError::Output(std::io::Error::from(std::io::ErrorKind::BrokenPipe)),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn test_step_mapping() {
        let err = SelfTestError::RandomUnavailable(BackendError::Library("x".into()));
        assert_eq!(err.step(), Some(Step::RandomBytes));

        let err = SelfTestError::Output(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.step(), None);
    }

    #[test]
    fn test_error_display_includes_cause() {
        let err = SelfTestError::DigestContextUnavailable(BackendError::NullHandle("EVP_MD_CTX_new"));
        let text = err.to_string();
        assert!(text.contains("digest context"));
        assert!(text.contains("EVP_MD_CTX_new"));
    }
}
