//! use thumbkit::error::ThumbKitError;

use thiserror::Error;

/// Represents errors that can occur in the ThumbKit library.
///
/// None of these are transient: every variant points at bad input data or a
/// programming error, so callers should not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThumbKitError {
    /// Error during data encoding, including canonical JSON invariant violations.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Malformed or algorithm-mismatched key, certificate or JWK input.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// The key has no canonical thumbprint parameter set.
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Error during key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),
}

pub type Result<T> = std::result::Result<T, ThumbKitError>;

impl From<der::Error> for ThumbKitError {
    /// Converts a `der::Error` into a `ThumbKitError`.
    fn from(err: der::Error) -> Self {
        ThumbKitError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for ThumbKitError {
    fn from(err: pkcs8::Error) -> Self {
        ThumbKitError::DecodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for ThumbKitError {
    fn from(err: pkcs8::spki::Error) -> Self {
        ThumbKitError::DecodingError(err.to_string())
    }
}

impl From<pem::PemError> for ThumbKitError {
    fn from(err: pem::PemError) -> Self {
        ThumbKitError::DecodingError(err.to_string())
    }
}

impl From<serde_json::Error> for ThumbKitError {
    fn from(err: serde_json::Error) -> Self {
        ThumbKitError::DecodingError(format!("invalid JWK JSON: {err}"))
    }
}

impl From<rsa::Error> for ThumbKitError {
    fn from(err: rsa::Error) -> Self {
        ThumbKitError::KeyGenerationError(err.to_string())
    }
}
