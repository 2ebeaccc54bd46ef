// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Per-run record of check outcomes, emitted as a structured log event.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::backend::BackendError;

/// Checks performed by a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Version,
    Init,
    RandomBytes,
    DigestContext,
    Cleanup,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Init => "init",
            Self::RandomBytes => "random_bytes",
            Self::DigestContext => "digest_context",
            Self::Cleanup => "cleanup",
        }
    }

    /// Whether a failure of this step fails the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Cleanup)
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
    pub elapsed_us: u64,
}

/// Summary of one self-test run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelfTestReport {
    pub version: Option<String>,
    pub steps: Vec<StepRecord>,
    pub passed: bool,
}

impl SelfTestReport {
    /// Run `check`, timing it and recording its outcome under `step`.
    pub(crate) fn record<T>(
        &mut self,
        step: Step,
        check: impl FnOnce() -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        debug!(step = step.as_str(), "starting check");
        let started = Instant::now();
        let result = check();
        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        let outcome = match &result {
            Ok(_) => {
                info!(step = step.as_str(), elapsed_us, "check passed");
                StepOutcome::Passed
            }
            Err(e) if step.is_fatal() => {
                error!(step = step.as_str(), error = %e, "check failed");
                StepOutcome::Failed { reason: e.to_string() }
            }
            Err(e) => {
                warn!(step = step.as_str(), error = %e, "check failed");
                StepOutcome::Failed { reason: e.to_string() }
            }
        };
        self.steps.push(StepRecord {
            step,
            outcome,
            elapsed_us,
        });
        result
    }

    /// Record for `step`, if it ran.
    pub fn step(&self, step: Step) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.step == step)
    }

    /// First fatal step that failed.
    pub fn failed_step(&self) -> Option<Step> {
        self.steps
            .iter()
            .find(|r| r.step.is_fatal() && matches!(r.outcome, StepOutcome::Failed { .. }))
            .map(|r| r.step)
    }

    /// Log the report as a single JSON-carrying event.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => info!(passed = self.passed, report = %json, "self-test finished"),
            Err(e) => warn!(error = %e, "failed to serialize self-test report"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_passed_step() {
        let mut report = SelfTestReport::default();
        let value = report.record(Step::Version, || Ok::<_, BackendError>(7));
        assert_eq!(value, Ok(7));
        assert_eq!(report.step(Step::Version).unwrap().outcome, StepOutcome::Passed);
        assert_eq!(report.failed_step(), None);
    }

    #[test]
    fn test_record_failed_step() {
        let mut report = SelfTestReport::default();
        let result: Result<(), _> =
            report.record(Step::RandomBytes, || Err(BackendError::Library("boom".into())));
        assert!(result.is_err());
        assert_eq!(report.failed_step(), Some(Step::RandomBytes));
        match &report.step(Step::RandomBytes).unwrap().outcome {
            StepOutcome::Failed { reason } => assert!(reason.contains("boom")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_cleanup_failure_is_not_fatal() {
        let mut report = SelfTestReport::default();
        let _ = report.record(Step::Cleanup, || Err::<(), _>(BackendError::Library("x".into())));
        assert_eq!(report.failed_step(), None);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = SelfTestReport {
            version: Some("OpenSSL 3.0.13".into()),
            ..Default::default()
        };
        let _ = report.record(Step::Init, || Ok::<_, BackendError>(()));
        let _ = report.record(Step::DigestContext, || {
            Err::<(), _>(BackendError::NullHandle("EVP_MD_CTX_new"))
        });

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["version"], "OpenSSL 3.0.13");
        assert_eq!(value["passed"], false);
        assert_eq!(value["steps"][0]["step"], "init");
        assert_eq!(value["steps"][0]["outcome"]["status"], "passed");
        assert_eq!(value["steps"][1]["step"], "digest_context");
        assert_eq!(value["steps"][1]["outcome"]["status"], "failed");
    }
}
