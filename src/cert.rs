use der::{Decode, Encode, EncodePem};
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::error::{Result, ThumbKitError};
use crate::key::PublicKey;
use crate::pem_utils::{self, Encoding};

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Represents an X.509 certificate.
///
/// This struct provides methods to decode the certificate from and encode it into DER or PEM
/// formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: x509_cert::Certificate,
}

impl Certificate {
    /// Decodes a certificate, detecting PEM or DER from the content.
    ///
    /// PEM is recognized by its `-----BEGIN ` armor (leading whitespace allowed)
    /// and must carry the `CERTIFICATE` label. DER must start with a SEQUENCE tag.
    #[instrument(skip_all, err)]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let encoding = pem_utils::detect_encoding(bytes)?;
        debug!(?encoding, "decoding certificate");
        match encoding {
            Encoding::Der => Self::from_der(bytes),
            Encoding::Pem => Self::from_pem(bytes),
        }
    }

    /// Decodes a DER-encoded certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = x509_cert::Certificate::from_der(der)?;
        Ok(Self { inner })
    }

    /// Decodes a PEM-encoded certificate.
    pub fn from_pem(pem: impl AsRef<[u8]>) -> Result<Self> {
        let der = pem_utils::pem_to_der(pem, CERTIFICATE_LABEL)?;
        Self::from_der(&der)
    }

    /// Encodes the certificate into DER format.
    ///
    /// # Returns
    /// A byte vector containing the DER-encoded certificate.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| ThumbKitError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    ///
    /// # Returns
    /// A string containing the PEM-encoded certificate.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| ThumbKitError::EncodingError(e.to_string()))
    }

    /// The subject distinguished name in RFC 4514 form.
    pub fn subject(&self) -> String {
        self.inner.tbs_certificate.subject.to_string()
    }

    pub fn not_before(&self) -> OffsetDateTime {
        OffsetDateTime::from(self.inner.tbs_certificate.validity.not_before.to_system_time())
    }

    pub fn not_after(&self) -> OffsetDateTime {
        OffsetDateTime::from(self.inner.tbs_certificate.validity.not_after.to_system_time())
    }

    /// Decodes the subject public key embedded in the certificate.
    pub fn public_key(&self) -> Result<PublicKey> {
        let spki = self
            .inner
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| ThumbKitError::EncodingError(e.to_string()))?;
        PublicKey::decode_spki_der(&spki)
    }
}
