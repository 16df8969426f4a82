//! JWK Thumbprint computation (RFC 7638)

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::jwk::JwkParameters;
use crate::key::PublicKey;

/// Hashes canonical JWK bytes with SHA-256 and encodes the digest as
/// unpadded base64url (always 43 characters).
pub fn compute_thumbprint(canonical: &[u8]) -> String {
    let hash = Sha256::digest(canonical);
    URL_SAFE_NO_PAD.encode(hash)
}

/// Compute the JWK thumbprint of a public key.
#[instrument(skip_all, fields(key_type = %key.key_type()), err)]
pub fn thumbprint_of(key: &PublicKey) -> Result<String> {
    let parameters = JwkParameters::from_public_key(key)?;
    let thumbprint = compute_thumbprint(&parameters.canonical_json()?);
    debug!(%thumbprint, "computed JWK thumbprint");
    Ok(thumbprint)
}
