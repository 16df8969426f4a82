//! Canonical JWK parameter sets (RFC 7638 §3.2).
//!
//! A [`JwkParameters`] value holds exactly the required members for its key
//! type and nothing else:
//!
//! | `kty` | members                  |
//! |-------|--------------------------|
//! | `RSA` | `e`, `kty`, `n`          |
//! | `EC`  | `crv`, `kty`, `x`, `y`   |
//!
//! RSA integers are encoded big-endian with no leading zero bytes, while EC
//! coordinates keep the full field length, as RFC 7518 requires.

use std::collections::BTreeMap;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use p256::ecdsa::VerifyingKey as P256VerifyingKey;
use p384::ecdsa::VerifyingKey as P384VerifyingKey;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use serde_json::Value;

use crate::canonical;
use crate::error::{Result, ThumbKitError};
use crate::key::PublicKey;
use crate::thumbprint::compute_thumbprint;

pub const KTY_RSA: &str = "RSA";
pub const KTY_EC: &str = "EC";
pub const CRV_P256: &str = "P-256";
pub const CRV_P384: &str = "P-384";

const RSA_MEMBERS: &[&str] = &["e", "kty", "n"];
const EC_MEMBERS: &[&str] = &["crv", "kty", "x", "y"];

/// Returns the required member names for a `kty`, in canonical order.
pub fn required_members(kty: &str) -> Result<&'static [&'static str]> {
    match kty {
        KTY_RSA => Ok(RSA_MEMBERS),
        KTY_EC => Ok(EC_MEMBERS),
        other => Err(ThumbKitError::UnsupportedKeyType(format!(
            "no thumbprint member set for kty {other:?}"
        ))),
    }
}

/// Encodes an unsigned big-endian integer as unpadded base64url, dropping
/// leading zero bytes. Zero encodes as a single zero byte (`"AA"`).
pub fn encode_uint(bytes: &[u8]) -> String {
    match bytes.iter().position(|b| *b != 0) {
        Some(start) => URL_SAFE_NO_PAD.encode(&bytes[start..]),
        None => URL_SAFE_NO_PAD.encode([0u8]),
    }
}

/// The required JWK members of a public key, keyed by member name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JwkParameters(BTreeMap<String, String>);

impl JwkParameters {
    /// Derives the canonical parameter set of a public key.
    ///
    /// Ed25519 keys fail with [`ThumbKitError::UnsupportedKeyType`].
    pub fn from_public_key(key: &PublicKey) -> Result<Self> {
        match key {
            PublicKey::Rsa(key) => Ok(Self::rsa(&key.n().to_bytes_be(), &key.e().to_bytes_be())),
            PublicKey::EcdsaP256(key) => {
                let point = key.to_encoded_point(false);
                Self::ec(
                    CRV_P256,
                    point.x().map(|x| x.as_slice()),
                    point.y().map(|y| y.as_slice()),
                )
            }
            PublicKey::EcdsaP384(key) => {
                let point = key.to_encoded_point(false);
                Self::ec(
                    CRV_P384,
                    point.x().map(|x| x.as_slice()),
                    point.y().map(|y| y.as_slice()),
                )
            }
            PublicKey::Ed25519(_) => Err(ThumbKitError::UnsupportedKeyType(
                "Ed25519 keys have no RFC 7638 member set".to_string(),
            )),
        }
    }

    fn rsa(modulus: &[u8], exponent: &[u8]) -> Self {
        Self::from_members([
            ("e", encode_uint(exponent)),
            ("kty", KTY_RSA.to_string()),
            ("n", encode_uint(modulus)),
        ])
    }

    fn ec(crv: &str, x: Option<&[u8]>, y: Option<&[u8]>) -> Result<Self> {
        let (Some(x), Some(y)) = (x, y) else {
            return Err(ThumbKitError::EncodingError(
                "EC point has no affine coordinates".to_string(),
            ));
        };
        Ok(Self::from_members([
            ("crv", crv.to_string()),
            ("kty", KTY_EC.to_string()),
            ("x", URL_SAFE_NO_PAD.encode(x)),
            ("y", URL_SAFE_NO_PAD.encode(y)),
        ]))
    }

    /// Builds a parameter map from arbitrary members without validating them.
    ///
    /// Validation happens in [`JwkParameters::canonical_json`]. A repeated name
    /// keeps its last value.
    pub fn from_members<I, K, V>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            members
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Parses a JWK JSON document and keeps only the required members for its `kty`.
    ///
    /// Optional members such as `alg`, `kid` or `use` are dropped.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or_else(|| {
            ThumbKitError::DecodingError("JWK must be a JSON object".to_string())
        })?;

        let kty = match object.get("kty") {
            Some(Value::String(kty)) => kty.as_str(),
            Some(_) => {
                return Err(ThumbKitError::DecodingError(
                    "member \"kty\" must be a string".to_string(),
                ));
            }
            None => {
                return Err(ThumbKitError::EncodingError(
                    "missing required member \"kty\"".to_string(),
                ));
            }
        };

        let mut members = BTreeMap::new();
        for name in required_members(kty)? {
            match object.get(*name) {
                Some(Value::String(value)) => {
                    members.insert(name.to_string(), value.clone());
                }
                Some(_) => {
                    return Err(ThumbKitError::DecodingError(format!(
                        "member {name:?} must be a string"
                    )));
                }
                None => {}
            }
        }

        let parameters = Self(members);
        parameters.check_members()?;
        Ok(parameters)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn kty(&self) -> Option<&str> {
        self.get("kty")
    }

    /// Members in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that exactly the required members for `kty` are present.
    fn check_members(&self) -> Result<()> {
        let kty = self.kty().ok_or_else(|| {
            ThumbKitError::EncodingError("missing required member \"kty\"".to_string())
        })?;
        let required = required_members(kty)?;

        if let Some(missing) = required.iter().find(|name| !self.0.contains_key(**name)) {
            return Err(ThumbKitError::EncodingError(format!(
                "missing required member {missing:?} for kty {kty:?}"
            )));
        }
        if let Some(extra) = self.0.keys().find(|name| !required.contains(&name.as_str())) {
            return Err(ThumbKitError::EncodingError(format!(
                "member {extra:?} is not part of the {kty:?} thumbprint input"
            )));
        }
        Ok(())
    }

    /// Serializes the members as canonical JSON bytes.
    pub fn canonical_json(&self) -> Result<Vec<u8>> {
        self.check_members()?;
        canonical::encode(self.iter())
    }

    /// SHA-256 thumbprint of the canonical JSON, base64url encoded.
    pub fn thumbprint(&self) -> Result<String> {
        Ok(compute_thumbprint(&self.canonical_json()?))
    }

    fn decode_member(&self, name: &str) -> Result<Vec<u8>> {
        let value = self.get(name).ok_or_else(|| {
            ThumbKitError::DecodingError(format!("missing required member {name:?}"))
        })?;
        URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|e| ThumbKitError::DecodingError(format!("member {name:?}: {e}")))
    }

    /// Rebuilds the public key these parameters describe.
    pub fn to_public_key(&self) -> Result<PublicKey> {
        self.check_members()?;
        match self.kty() {
            Some(KTY_RSA) => {
                let n = BigUint::from_bytes_be(&self.decode_member("n")?);
                let e = BigUint::from_bytes_be(&self.decode_member("e")?);
                RsaPublicKey::new(n, e)
                    .map(PublicKey::Rsa)
                    .map_err(|e| ThumbKitError::DecodingError(e.to_string()))
            }
            Some(KTY_EC) => {
                let x = self.decode_member("x")?;
                let y = self.decode_member("y")?;
                let crv = self.get("crv").unwrap_or_default();
                let field_len = match crv {
                    CRV_P256 => 32,
                    CRV_P384 => 48,
                    other => {
                        return Err(ThumbKitError::UnsupportedKeyType(format!(
                            "unsupported curve {other:?}"
                        )));
                    }
                };
                if x.len() != field_len || y.len() != field_len {
                    return Err(ThumbKitError::DecodingError(format!(
                        "{crv} coordinates must be {field_len} bytes"
                    )));
                }

                let mut sec1 = Vec::with_capacity(1 + 2 * field_len);
                sec1.push(0x04);
                sec1.extend_from_slice(&x);
                sec1.extend_from_slice(&y);

                let key = if crv == CRV_P256 {
                    P256VerifyingKey::from_sec1_bytes(&sec1).map(PublicKey::EcdsaP256)
                } else {
                    P384VerifyingKey::from_sec1_bytes(&sec1).map(PublicKey::EcdsaP384)
                };
                key.map_err(|_| {
                    ThumbKitError::DecodingError(format!("point is not on curve {crv}"))
                })
            }
            other => Err(ThumbKitError::UnsupportedKeyType(format!(
                "no public key mapping for kty {other:?}"
            ))),
        }
    }
}
