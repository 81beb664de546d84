//! Error types for the cryptographic stack.
//!
//! Every fallible operation above the permutation returns a [`CryptoError`].
//! The permutation and the NIST encoders are total and never appear here.

use thiserror::Error;

/// Errors surfaced by curve, protocol and layout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Decompression failed: the radicand has no square root mod p.
    #[error("invalid point: x-coordinate has no matching y on E521")]
    InvalidPoint,

    /// The recomputed tag did not match the stored one.
    #[error("authentication failed -- wrong passphrase or tampered cryptogram")]
    AuthenticationFailure,

    /// The recomputed Schnorr challenge did not match the signature.
    #[error("signature verification failed")]
    VerificationFailed,

    /// A component is missing, badly encoded, the wrong length, or off-curve.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl CryptoError {
    /// Shorthand for building a [`CryptoError::MalformedInput`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        CryptoError::MalformedInput(reason.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CryptoError>;
