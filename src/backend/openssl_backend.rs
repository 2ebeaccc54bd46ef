// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Backend that forwards every capability to the linked OpenSSL library.

use openssl::error::ErrorStack;
use openssl::md_ctx::MdCtx;
use serde::Serialize;
use tracing::debug;

use super::{BackendError, CryptoBackend};

/// Build information reported by `OpenSSL_version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionDetails {
    pub number: i64,
    pub version: &'static str,
    pub c_flags: &'static str,
    pub built_on: &'static str,
    pub platform: &'static str,
    pub dir: &'static str,
}

/// The linked OpenSSL library.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenSslBackend;

impl OpenSslBackend {
    pub fn new() -> Self {
        Self
    }

    /// Full build information, for diagnostics.
    pub fn version_details(&self) -> VersionDetails {
        VersionDetails {
            number: openssl::version::number(),
            version: openssl::version::version(),
            c_flags: openssl::version::c_flags(),
            built_on: openssl::version::built_on(),
            platform: openssl::version::platform(),
            dir: openssl::version::dir(),
        }
    }
}

/// Drain the calling thread's OpenSSL error queue.
///
/// Returns the drained errors as text, or `None` when the queue was empty.
fn drain_error_queue() -> Option<String> {
    let pending = ErrorStack::get();
    if pending.errors().is_empty() {
        None
    } else {
        Some(pending.to_string())
    }
}

impl CryptoBackend for OpenSslBackend {
    type DigestContext = MdCtx;

    fn version(&self) -> Result<String, BackendError> {
        let version = openssl::version::version();
        if version.trim().is_empty() {
            return Err(BackendError::EmptyVersion);
        }
        debug!(details = ?self.version_details(), "queried library version");
        Ok(version.to_string())
    }

    fn init(&self) -> Result<(), BackendError> {
        if let Some(stale) = drain_error_queue() {
            debug!(errors = %stale, "discarded errors queued before init");
        }
        // OPENSSL_init_ssl loads error strings and algorithm tables together.
        openssl::init();
        match drain_error_queue() {
            None => Ok(()),
            Some(errors) => Err(BackendError::InitErrors(errors)),
        }
    }

    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), BackendError> {
        openssl::rand::rand_bytes(buf)?;
        Ok(())
    }

    fn new_digest_context(&self) -> Result<MdCtx, BackendError> {
        Ok(MdCtx::new()?)
    }

    fn cleanup(&self) -> Result<(), BackendError> {
        // OpenSSL 1.1+ frees its global tables at process exit; what is left
        // for us is whatever the run pushed onto the error queue.
        match drain_error_queue() {
            None => Ok(()),
            Some(errors) => Err(BackendError::Library(errors)),
        }
    }
}
