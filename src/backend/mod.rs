// Copyright 2024-2026 openssl-selftest Contributors
// Licensed under the Apache License, Version 2.0

//! Capability surface of the cryptography library under test.
//!
//! The self-test runner only ever talks to a [`CryptoBackend`]. The real
//! implementation forwards to OpenSSL; the mock records every call and can be
//! told to fail individual capabilities.

pub mod mock;
mod openssl_backend;

pub use mock::{MockBackend, MockCalls, MockDigestContext};
pub use openssl_backend::{OpenSslBackend, VersionDetails};

use thiserror::Error;

/// Errors reported by a cryptography backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("OpenSSL error: {0}")]
    Library(String),

    #[error("library reported an empty version string")]
    EmptyVersion,

    #[error("initialization left errors on the queue: {0}")]
    InitErrors(String),

    #[error("{0} returned a null handle")]
    NullHandle(&'static str),
}

impl From<openssl::error::ErrorStack> for BackendError {
    fn from(stack: openssl::error::ErrorStack) -> Self {
        Self::Library(stack.to_string())
    }
}

/// Trait abstracting the library calls the self-test exercises.
pub trait CryptoBackend {
    /// Opaque digest context. Dropping it releases the underlying resource.
    type DigestContext;

    /// Human-readable library version.
    fn version(&self) -> Result<String, BackendError>;

    /// Bootstrap process-global library state (error strings, algorithm tables).
    fn init(&self) -> Result<(), BackendError>;

    /// Fill `buf` with cryptographically strong random bytes.
    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), BackendError>;

    /// Allocate a fresh digest context.
    fn new_digest_context(&self) -> Result<Self::DigestContext, BackendError>;

    /// Release process-global library state acquired by [`init`](Self::init).
    fn cleanup(&self) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NullHandle("EVP_MD_CTX_new");
        assert_eq!(err.to_string(), "EVP_MD_CTX_new returned a null handle");

        let err = BackendError::EmptyVersion;
        assert!(err.to_string().contains("empty version"));

        let err = BackendError::Library("error:1234".to_string());
        assert!(err.to_string().starts_with("OpenSSL error"));
    }

    #[test]
    fn test_error_stack_conversion() {
        let stack = openssl::error::ErrorStack::get();
        let err = BackendError::from(stack);
        assert!(matches!(err, BackendError::Library(_)));
    }
}
