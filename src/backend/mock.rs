// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Recording mock backend for exercising the runner without OpenSSL.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{BackendError, CryptoBackend};

/// Version string the mock reports unless overridden.
pub const MOCK_VERSION: &str = "OpenSSL 3.0.13 30 Jan 2024 (mock)";

#[derive(Debug, Default)]
struct Counters {
    version: AtomicUsize,
    init: AtomicUsize,
    random_bytes: AtomicUsize,
    last_random_len: AtomicUsize,
    digest_contexts: AtomicUsize,
    digest_releases: AtomicUsize,
    cleanup: AtomicUsize,
}

/// Snapshot of how often each capability was invoked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MockCalls {
    pub version: usize,
    pub init: usize,
    pub random_bytes: usize,
    pub last_random_len: usize,
    pub digest_contexts: usize,
    pub digest_releases: usize,
    pub cleanup: usize,
}

/// Digest context handed out by [`MockBackend`]; counts its own release.
#[derive(Debug)]
pub struct MockDigestContext {
    counters: Arc<Counters>,
}

impl Drop for MockDigestContext {
    fn drop(&mut self) {
        self.counters.digest_releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock backend. Every capability succeeds unless told otherwise.
#[derive(Debug, Clone)]
pub struct MockBackend {
    version: String,
    fail_init: bool,
    fail_random_bytes: bool,
    fail_digest_context: bool,
    fail_cleanup: bool,
    counters: Arc<Counters>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            version: MOCK_VERSION.to_string(),
            fail_init: false,
            fail_random_bytes: false,
            fail_digest_context: false,
            fail_cleanup: false,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Report `version` from the version capability. An empty string fails.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn fail_random_bytes(mut self) -> Self {
        self.fail_random_bytes = true;
        self
    }

    pub fn fail_digest_context(mut self) -> Self {
        self.fail_digest_context = true;
        self
    }

    pub fn fail_cleanup(mut self) -> Self {
        self.fail_cleanup = true;
        self
    }

    /// Call counts so far.
    pub fn calls(&self) -> MockCalls {
        let c = &self.counters;
        MockCalls {
            version: c.version.load(Ordering::SeqCst),
            init: c.init.load(Ordering::SeqCst),
            random_bytes: c.random_bytes.load(Ordering::SeqCst),
            last_random_len: c.last_random_len.load(Ordering::SeqCst),
            digest_contexts: c.digest_contexts.load(Ordering::SeqCst),
            digest_releases: c.digest_releases.load(Ordering::SeqCst),
            cleanup: c.cleanup.load(Ordering::SeqCst),
        }
    }

    /// Digest contexts handed out and not yet dropped.
    pub fn live_digest_contexts(&self) -> usize {
        let calls = self.calls();
        calls.digest_contexts - calls.digest_releases
    }
}

impl CryptoBackend for MockBackend {
    type DigestContext = MockDigestContext;

    fn version(&self) -> Result<String, BackendError> {
        self.counters.version.fetch_add(1, Ordering::SeqCst);
        if self.version.is_empty() {
            return Err(BackendError::EmptyVersion);
        }
        Ok(self.version.clone())
    }

    fn init(&self) -> Result<(), BackendError> {
        self.counters.init.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(BackendError::InitErrors(
                "error:0A0000A1:SSL routines::library has no ciphers".to_string(),
            ));
        }
        Ok(())
    }

    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), BackendError> {
        self.counters.random_bytes.fetch_add(1, Ordering::SeqCst);
        self.counters.last_random_len.store(buf.len(), Ordering::SeqCst);
        if self.fail_random_bytes {
            return Err(BackendError::Library(
                "error:12000090:random number generator::unable to fetch drbg".to_string(),
            ));
        }
        buf.fill(0xA5);
        Ok(())
    }

    fn new_digest_context(&self) -> Result<MockDigestContext, BackendError> {
        if self.fail_digest_context {
            return Err(BackendError::NullHandle("EVP_MD_CTX_new"));
        }
        self.counters.digest_contexts.fetch_add(1, Ordering::SeqCst);
        Ok(MockDigestContext {
            counters: Arc::clone(&self.counters),
        })
    }

    fn cleanup(&self) -> Result<(), BackendError> {
        self.counters.cleanup.fetch_add(1, Ordering::SeqCst);
        if self.fail_cleanup {
            return Err(BackendError::Library("error queue not empty".to_string()));
        }
        Ok(())
    }
}
