// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Scoped ownership of the library's process-global state.

use tracing::warn;

use crate::backend::{BackendError, CryptoBackend};

/// Initialized library state. Cleanup runs exactly once: either through
/// [`release`](Self::release) or when the guard is dropped.
pub struct LibraryGuard<'a, B: CryptoBackend> {
    backend: &'a B,
    released: bool,
}

impl<'a, B: CryptoBackend> LibraryGuard<'a, B> {
    /// Initialize the library. No guard exists if initialization fails.
    pub fn acquire(backend: &'a B) -> Result<Self, BackendError> {
        backend.init()?;
        Ok(Self {
            backend,
            released: false,
        })
    }

    /// Run cleanup now and report its outcome.
    pub fn release(mut self) -> Result<(), BackendError> {
        self.released = true;
        self.backend.cleanup()
    }
}

impl<B: CryptoBackend> Drop for LibraryGuard<'_, B> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.backend.cleanup() {
            warn!(error = %e, "library cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    #[test]
    fn test_release_runs_cleanup_once() {
        let mock = MockBackend::new();
        let guard = LibraryGuard::acquire(&mock).unwrap();
        guard.release().unwrap();
        assert_eq!(mock.calls().cleanup, 1);
    }

    #[test]
    fn test_drop_runs_cleanup_once() {
        let mock = MockBackend::new();
        {
            let _guard = LibraryGuard::acquire(&mock).unwrap();
        }
        assert_eq!(mock.calls().cleanup, 1);
    }

    #[test]
    fn test_failed_init_yields_no_guard() {
        let mock = MockBackend::new().fail_init();
        assert!(LibraryGuard::acquire(&mock).is_err());
        assert_eq!(mock.calls().cleanup, 0);
    }

    #[test]
    fn test_release_reports_cleanup_error() {
        let mock = MockBackend::new().fail_cleanup();
        let guard = LibraryGuard::acquire(&mock).unwrap();
        assert!(guard.release().is_err());
        assert_eq!(mock.calls().cleanup, 1);
    }
}
