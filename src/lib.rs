//! # ThumbKit - JWK Thumbprints and Key Fixtures in Pure Rust
//!
//! ThumbKit computes RFC 7638 JSON Web Key thumbprints and loads key material
//! and certificates from their standard encodings, built entirely with
//! rustcrypto libraries.
//!
//! A thumbprint is the SHA-256 digest of a canonical JSON object holding only
//! the required public members of a key, in ascending member order and with no
//! whitespace, encoded as base64url without padding. Any deviation in member
//! selection, ordering or encoding changes the hash, so every step of the
//! pipeline is exposed and tested on its own:
//!
//! 1. [`key`] / [`cert`]: decode SPKI, PKCS#8 and X.509 inputs
//! 2. [`jwk`]: derive the required members of a public key
//! 3. [`canonical`]: serialize them as canonical JSON
//! 4. [`thumbprint`]: hash and encode
//!
//! ## Supported Key Types
//!
//! - **RSA**: thumbprint members `e`, `kty`, `n`
//! - **ECDSA**: P-256 and P-384, thumbprint members `crv`, `kty`, `x`, `y`
//! - **Ed25519**: decoding and encoding only; thumbprinting reports
//!   [`error::ThumbKitError::UnsupportedKeyType`]
//!
//! ## Quick Start
//!
//! ```rust
//! use thumbkit::key::{KeyPair, PublicKey};
//!
//! # fn main() -> Result<(), thumbkit::error::ThumbKitError> {
//! let key_pair = KeyPair::generate_ecdsa_p256();
//! let der = key_pair.public_key().to_spki_der()?;
//!
//! let public_key = PublicKey::decode_spki_der(&der)?;
//! let thumbprint = public_key.thumbprint()?;
//! assert_eq!(thumbprint.len(), 43);
//! # Ok(())
//! # }
//! ```
//!
//! ### From a JWK document
//!
//! ```rust
//! use thumbkit::jwk::JwkParameters;
//!
//! # fn main() -> Result<(), thumbkit::error::ThumbKitError> {
//! let jwk = JwkParameters::from_json(r#"{"kty":"RSA","e":"AQAB","n":"pZsT","kid":"ignored"}"#)?;
//! assert_eq!(
//!     jwk.canonical_json()?,
//!     br#"{"e":"AQAB","kty":"RSA","n":"pZsT"}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use thumbkit::{error::ThumbKitError, key::{KeyType, PublicKey}};
//!
//! match PublicKey::from_spki_der(b"not a key", KeyType::Rsa) {
//!     Ok(_) => println!("Key decoded"),
//!     Err(ThumbKitError::DecodingError(msg)) => println!("Failed to decode key: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`key`]: SPKI / PKCS#8 decoding and encoding, key generation
//! - [`cert`]: X.509 certificate decoding with PEM/DER detection
//! - [`jwk`]: canonical JWK member sets
//! - [`canonical`]: canonical JSON encoder
//! - [`thumbprint`]: RFC 7638 thumbprints
//! - [`fixture`]: pinned test key pair, certificate and expected values
//! - [`error`]: error types

pub mod canonical;
pub mod cert;
pub mod error;
#[cfg(feature = "fixtures")]
pub mod fixture;
pub mod jwk;
pub mod key;
pub mod pem_utils;
pub mod thumbprint;

pub use thumbprint::{compute_thumbprint, thumbprint_of};
