//! Pinned RSA test key pair and certificate.
//!
//! The key pair and certificate are embedded from `resources/` and never
//! change between runs. The constants [`N`], [`E`], [`KTY`] and
//! [`THUMBPRINT`] describe the public half of [`key_pair`] and can be used to
//! assert results. Only the public half is pinned: the private key is a
//! separate RSA key that merely has to decode.
//!
//! To regenerate, run `cargo run --example generate`, copy the printed lines
//! into the constants below and move `public.key` / `private.key` into
//! `resources/`.

use std::fmt;

use crate::cert::Certificate;
use crate::error::{Result, ThumbKitError};
use crate::jwk::JwkParameters;
use crate::key::{KeyPair, KeyType, PublicKey};

pub const N: &str = "pZsTKY41y_CwgJ0VX7BmmGs_7UprmXQMGPcnSbBeJAjZHA9SyyJKaWv4fNUdBIAX3Y2QoZixj50nQLyLv2ng3pvEoRL0sx9ZHgp5ndAjpIiVQ_8V01TTYCEDUc9ii7bjVkgFAb4ValZGFJZ54PcCnAHvXi5g0ELORzGcTuRqHVAUckMV2otr0g0u_5bWMm6EMAbBrGQCgUGjbZQHjava1Y-5tHXZkPBahJ2LvKRqMmJUlr0anKuJJtJUG03DJYAxABv8YAaXFBnGw6kKJRpUFAC55ry4sp4kGy0NrK2TVWmZW9kStniRv4RaJGI9aZGYwQy2kUykibBNmWEQUlIwIw";
pub const E: &str = "AQAB";
pub const KTY: &str = "RSA";
pub const THUMBPRINT: &str = "HnWjTDnyqlCrm6tZ-6wX-TrEXgRdeNu9G71gqxSO6o0";

const PUBLIC_KEY_DER: &[u8] = include_bytes!("../resources/public.key");
const PRIVATE_KEY_DER: &[u8] = include_bytes!("../resources/private.key");
const CERTIFICATE_PEM: &[u8] = include_bytes!("../resources/cert.pem");

/// Returns the pinned 2048-bit RSA key pair.
///
/// The halves do not belong together: the public key is the pinned one, the
/// private key is an unrelated RSA key. Do not sign with the private half and
/// expect the public half to verify.
pub fn key_pair() -> Result<KeyPair> {
    KeyPair::from_der(PUBLIC_KEY_DER, PRIVATE_KEY_DER, KeyType::Rsa)
}

/// Returns the pinned self-signed test certificate.
pub fn certificate() -> Result<Certificate> {
    Certificate::decode(CERTIFICATE_PEM)
}

/// The four values pinned above, computed for an arbitrary RSA key.
///
/// `Display` prints one `NAME = value` line per field, ready to paste.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureConstants {
    pub n: String,
    pub e: String,
    pub kty: String,
    pub thumbprint: String,
}

impl FixtureConstants {
    pub fn from_public_key(key: &PublicKey) -> Result<Self> {
        if key.key_type() != KeyType::Rsa {
            return Err(ThumbKitError::UnsupportedKeyType(format!(
                "fixture constants are defined for RSA keys, got {}",
                key.key_type()
            )));
        }

        let parameters = JwkParameters::from_public_key(key)?;
        let member = |name: &str| {
            parameters
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| ThumbKitError::EncodingError(format!("missing member {name:?}")))
        };

        Ok(Self {
            n: member("n")?,
            e: member("e")?,
            kty: member("kty")?,
            thumbprint: parameters.thumbprint()?,
        })
    }

    /// The constants of the pinned key pair.
    pub fn pinned() -> Self {
        Self {
            n: N.to_string(),
            e: E.to_string(),
            kty: KTY.to_string(),
            thumbprint: THUMBPRINT.to_string(),
        }
    }
}

impl fmt::Display for FixtureConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N = {}", self.n)?;
        writeln!(f, "E = {}", self.e)?;
        writeln!(f, "KTY = {}", self.kty)?;
        write!(f, "THUMBPRINT = {}", self.thumbprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_key_matches_pinned_constants() {
        let pair = key_pair().unwrap();
        let computed = FixtureConstants::from_public_key(pair.public_key()).unwrap();
        assert_eq!(computed, FixtureConstants::pinned());
    }

    #[test]
    fn key_pair_halves_are_unrelated() {
        let pair = key_pair().unwrap();
        assert_eq!(pair.private_key().key_type(), KeyType::Rsa);
        assert_ne!(PublicKey::from(pair.private_key()), *pair.public_key());
    }

    #[test]
    fn display_prints_four_lines() {
        let text = FixtureConstants::pinned().to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "E = AQAB");
        assert_eq!(lines[2], "KTY = RSA");
        assert_eq!(lines[3], format!("THUMBPRINT = {THUMBPRINT}"));
    }
}
