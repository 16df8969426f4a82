use std::fmt;

use const_oid::ObjectIdentifier;
use const_oid::db::{rfc5912, rfc8410};
use der::Decode;
use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey as Ed25519VerifyingKey};
use p256::ecdsa::{SigningKey as P256SigningKey, VerifyingKey as P256VerifyingKey};
use p384::ecdsa::{SigningKey as P384SigningKey, VerifyingKey as P384VerifyingKey};
use pkcs8::spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
    PrivateKeyInfo,
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, instrument};

use crate::error::{Result, ThumbKitError};
use crate::pem_utils;

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Key algorithm families understood by the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    EcdsaP256,
    EcdsaP384,
    Ed25519,
}

impl KeyType {
    /// Maps an algorithm identifier (and, for EC keys, its named curve) to a key type.
    fn from_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<Self> {
        let (oid, parameters) = algorithm.oids()?;
        match (oid, parameters) {
            (rfc5912::RSA_ENCRYPTION, _) => Ok(KeyType::Rsa),
            (rfc5912::ID_EC_PUBLIC_KEY, Some(rfc5912::SECP_256_R_1)) => Ok(KeyType::EcdsaP256),
            (rfc5912::ID_EC_PUBLIC_KEY, Some(rfc5912::SECP_384_R_1)) => Ok(KeyType::EcdsaP384),
            (rfc8410::ID_ED_25519, _) => Ok(KeyType::Ed25519),
            (oid, parameters) => Err(ThumbKitError::DecodingError(format!(
                "unsupported key algorithm {oid}{}",
                parameters
                    .map(|p: ObjectIdentifier| format!(" ({p})"))
                    .unwrap_or_default()
            ))),
        }
    }

    /// Reads the algorithm tag of a SubjectPublicKeyInfo structure.
    pub fn detect_spki(der: &[u8]) -> Result<Self> {
        let spki = SubjectPublicKeyInfoRef::from_der(der)?;
        let key_type = Self::from_algorithm(&spki.algorithm)?;
        debug!(?key_type, "detected public key algorithm");
        Ok(key_type)
    }

    /// Reads the algorithm tag of a PKCS#8 PrivateKeyInfo structure.
    pub fn detect_pkcs8(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::from_der(der)?;
        let key_type = Self::from_algorithm(&info.algorithm)?;
        debug!(?key_type, "detected private key algorithm");
        Ok(key_type)
    }

    fn ensure(self, found: KeyType) -> Result<()> {
        if self == found {
            Ok(())
        } else {
            Err(ThumbKitError::DecodingError(format!(
                "algorithm mismatch: expected {self}, found {found}"
            )))
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyType::Rsa => "RSA",
            KeyType::EcdsaP256 => "ECDSA P-256",
            KeyType::EcdsaP384 => "ECDSA P-384",
            KeyType::Ed25519 => "Ed25519",
        })
    }
}

/// A decoded public key.
#[derive(Clone, Debug, PartialEq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    EcdsaP256(P256VerifyingKey),
    EcdsaP384(P384VerifyingKey),
    Ed25519(Ed25519VerifyingKey),
}

impl PublicKey {
    /// Decodes SubjectPublicKeyInfo DER, requiring the embedded algorithm to be `key_type`.
    #[instrument(skip(der), err)]
    pub fn from_spki_der(der: &[u8], key_type: KeyType) -> Result<Self> {
        key_type.ensure(KeyType::detect_spki(der)?)?;
        Self::decode_as(der, key_type)
    }

    /// Decodes SubjectPublicKeyInfo DER of any supported algorithm.
    #[instrument(skip_all, err)]
    pub fn decode_spki_der(der: &[u8]) -> Result<Self> {
        let key_type = KeyType::detect_spki(der)?;
        Self::decode_as(der, key_type)
    }

    /// Decodes a `PUBLIC KEY` PEM block, requiring the embedded algorithm to be `key_type`.
    pub fn from_spki_pem(pem: &str, key_type: KeyType) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, PUBLIC_KEY_LABEL)?;
        Self::from_spki_der(&der, key_type)
    }

    fn decode_as(der: &[u8], key_type: KeyType) -> Result<Self> {
        let key = match key_type {
            KeyType::Rsa => RsaPublicKey::from_public_key_der(der).map(PublicKey::Rsa),
            KeyType::EcdsaP256 => {
                P256VerifyingKey::from_public_key_der(der).map(PublicKey::EcdsaP256)
            }
            KeyType::EcdsaP384 => {
                P384VerifyingKey::from_public_key_der(der).map(PublicKey::EcdsaP384)
            }
            KeyType::Ed25519 => {
                Ed25519VerifyingKey::from_public_key_der(der).map(PublicKey::Ed25519)
            }
        }?;
        Ok(key)
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Rsa(_) => KeyType::Rsa,
            PublicKey::EcdsaP256(_) => KeyType::EcdsaP256,
            PublicKey::EcdsaP384(_) => KeyType::EcdsaP384,
            PublicKey::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Encodes the key as SubjectPublicKeyInfo DER.
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PublicKey::Rsa(key) => key.to_public_key_der(),
            PublicKey::EcdsaP256(key) => key.to_public_key_der(),
            PublicKey::EcdsaP384(key) => key.to_public_key_der(),
            PublicKey::Ed25519(key) => key.to_public_key_der(),
        }
        .map_err(|e| ThumbKitError::EncodingError(e.to_string()))?;
        Ok(document.into_vec())
    }

    /// Encodes the key as a `PUBLIC KEY` PEM block.
    pub fn to_spki_pem(&self) -> Result<String> {
        Ok(pem_utils::der_to_pem(&self.to_spki_der()?, PUBLIC_KEY_LABEL))
    }

    /// Computes the RFC 7638 thumbprint of this key.
    pub fn thumbprint(&self) -> Result<String> {
        crate::thumbprint::thumbprint_of(self)
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(private: &PrivateKey) -> Self {
        match private {
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            PrivateKey::EcdsaP256(key) => PublicKey::EcdsaP256(key.verifying_key().to_owned()),
            PrivateKey::EcdsaP384(key) => PublicKey::EcdsaP384(key.verifying_key().to_owned()),
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
        }
    }
}

/// A decoded private key.
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(Box<RsaPrivateKey>),
    EcdsaP256(P256SigningKey),
    EcdsaP384(P384SigningKey),
    Ed25519(Ed25519SigningKey),
}

impl PrivateKey {
    /// Decodes PKCS#8 DER, requiring the embedded algorithm to be `key_type`.
    #[instrument(skip(der), err)]
    pub fn from_pkcs8_der(der: &[u8], key_type: KeyType) -> Result<Self> {
        key_type.ensure(KeyType::detect_pkcs8(der)?)?;
        Self::decode_as(der, key_type)
    }

    /// Decodes PKCS#8 DER of any supported algorithm.
    #[instrument(skip_all, err)]
    pub fn decode_pkcs8_der(der: &[u8]) -> Result<Self> {
        let key_type = KeyType::detect_pkcs8(der)?;
        Self::decode_as(der, key_type)
    }

    /// Decodes an unencrypted `PRIVATE KEY` PEM block.
    pub fn from_pkcs8_pem(pem: &str, key_type: KeyType) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, PRIVATE_KEY_LABEL)?;
        Self::from_pkcs8_der(&der, key_type)
    }

    fn decode_as(der: &[u8], key_type: KeyType) -> Result<Self> {
        let key = match key_type {
            KeyType::Rsa => {
                RsaPrivateKey::from_pkcs8_der(der).map(|key| PrivateKey::Rsa(Box::new(key)))
            }
            KeyType::EcdsaP256 => P256SigningKey::from_pkcs8_der(der).map(PrivateKey::EcdsaP256),
            KeyType::EcdsaP384 => P384SigningKey::from_pkcs8_der(der).map(PrivateKey::EcdsaP384),
            KeyType::Ed25519 => Ed25519SigningKey::from_pkcs8_der(der).map(PrivateKey::Ed25519),
        }?;
        Ok(key)
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            PrivateKey::Rsa(_) => KeyType::Rsa,
            PrivateKey::EcdsaP256(_) => KeyType::EcdsaP256,
            PrivateKey::EcdsaP384(_) => KeyType::EcdsaP384,
            PrivateKey::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Encodes the key as unencrypted PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            PrivateKey::Rsa(key) => key.to_pkcs8_der(),
            PrivateKey::EcdsaP256(key) => key.to_pkcs8_der(),
            PrivateKey::EcdsaP384(key) => key.to_pkcs8_der(),
            PrivateKey::Ed25519(key) => key.to_pkcs8_der(),
        }
        .map_err(|e| ThumbKitError::EncodingError(e.to_string()))?;
        Ok(document.as_bytes().to_vec())
    }

    /// Encodes the key as an unencrypted `PRIVATE KEY` PEM block.
    pub fn to_pkcs8_pem(&self) -> Result<String> {
        let document = match self {
            PrivateKey::Rsa(key) => key.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::EcdsaP256(key) => key.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::EcdsaP384(key) => key.to_pkcs8_pem(LineEnding::LF),
            PrivateKey::Ed25519(key) => key.to_pkcs8_pem(LineEnding::LF),
        }
        .map_err(|e| ThumbKitError::EncodingError(e.to_string()))?;
        Ok(String::clone(&document))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.key_type()).finish()
    }
}

/// A public key together with a private key.
///
/// The halves are not checked against each other; only the public half takes
/// part in thumbprinting.
#[derive(Clone, Debug)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    pub fn new(public: PublicKey, private: PrivateKey) -> Self {
        Self { public, private }
    }

    /// Decodes an SPKI public key and a PKCS#8 private key of the same algorithm.
    pub fn from_der(public_der: &[u8], private_der: &[u8], key_type: KeyType) -> Result<Self> {
        Ok(Self {
            public: PublicKey::from_spki_der(public_der, key_type)?,
            private: PrivateKey::from_pkcs8_der(private_der, key_type)?,
        })
    }

    /// Generate an RSA key pair with the specified number of bits.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let mut rng = rand_core::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        Ok(Self::from_private(PrivateKey::Rsa(Box::new(private))))
    }

    /// Generate an ECDSA P-256 key pair.
    pub fn generate_ecdsa_p256() -> Self {
        let mut rng = rand_core::OsRng;
        Self::from_private(PrivateKey::EcdsaP256(P256SigningKey::random(&mut rng)))
    }

    /// Generate an Ed25519 key pair.
    pub fn generate_ed25519() -> Self {
        let mut rng = rand_core::OsRng;
        Self::from_private(PrivateKey::Ed25519(Ed25519SigningKey::generate(&mut rng)))
    }

    fn from_private(private: PrivateKey) -> Self {
        Self {
            public: PublicKey::from(&private),
            private,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecdsa_keys_survive_der_round_trip() {
        let pair = KeyPair::generate_ecdsa_p256();
        let public_der = pair.public_key().to_spki_der().unwrap();
        let private_der = pair.private_key().to_pkcs8_der().unwrap();

        let decoded = KeyPair::from_der(&public_der, &private_der, KeyType::EcdsaP256).unwrap();
        assert_eq!(decoded.public_key(), pair.public_key());
        assert_eq!(PublicKey::from(decoded.private_key()), *pair.public_key());
    }

    #[test]
    fn detection_reports_algorithm() {
        let pair = KeyPair::generate_ed25519();
        let der = pair.public_key().to_spki_der().unwrap();
        assert_eq!(KeyType::detect_spki(&der).unwrap(), KeyType::Ed25519);

        let der = pair.private_key().to_pkcs8_der().unwrap();
        assert_eq!(KeyType::detect_pkcs8(&der).unwrap(), KeyType::Ed25519);
    }

    #[test]
    fn mismatched_algorithm_is_a_decoding_error() {
        let pair = KeyPair::generate_ecdsa_p256();
        let der = pair.public_key().to_spki_der().unwrap();
        let err = PublicKey::from_spki_der(&der, KeyType::EcdsaP384).unwrap_err();
        assert!(matches!(err, ThumbKitError::DecodingError(_)));
    }

    #[test]
    fn pem_round_trip() {
        let pair = KeyPair::generate_ecdsa_p256();
        let pem = pair.public_key().to_spki_pem().unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(!pem.contains('\r'));
        let decoded = PublicKey::from_spki_pem(&pem, KeyType::EcdsaP256).unwrap();
        assert_eq!(&decoded, pair.public_key());

        let pem = pair.private_key().to_pkcs8_pem().unwrap();
        assert!(!pem.contains('\r'));
        let decoded = PrivateKey::from_pkcs8_pem(&pem, KeyType::EcdsaP256).unwrap();
        assert_eq!(PublicKey::from(&decoded), *pair.public_key());

        // a public key block is not accepted where a private key is expected
        let public_pem = pair.public_key().to_spki_pem().unwrap();
        assert!(PrivateKey::from_pkcs8_pem(&public_pem, KeyType::EcdsaP256).is_err());
    }

    #[test]
    fn private_key_debug_hides_material() {
        let pair = KeyPair::generate_ed25519();
        assert_eq!(format!("{:?}", pair.private_key()), "PrivateKey(Ed25519)");
    }
}
