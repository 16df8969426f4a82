use crate::error::{Result, ThumbKitError};

/// Encoding of a binary object, as found by [`detect_encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Raw DER bytes.
    Der,
    /// Base64 text between `-----BEGIN` / `-----END` armor lines.
    Pem,
}

const PEM_PREAMBLE: &[u8] = b"-----BEGIN ";
const DER_SEQUENCE_TAG: u8 = 0x30;

/// Sniffs whether `bytes` hold PEM text or a DER structure.
///
/// Leading ASCII whitespace is skipped. Anything that is neither PEM armor nor
/// starts with a DER SEQUENCE tag is rejected.
pub fn detect_encoding(bytes: &[u8]) -> Result<Encoding> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or_else(|| ThumbKitError::DecodingError("input is empty".to_string()))?;
    let body = &bytes[start..];

    if body.starts_with(PEM_PREAMBLE) {
        Ok(Encoding::Pem)
    } else if start == 0 && body[0] == DER_SEQUENCE_TAG {
        Ok(Encoding::Der)
    } else {
        Err(ThumbKitError::DecodingError(
            "unrecognized encoding: neither PEM armor nor a DER sequence".to_string(),
        ))
    }
}

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    let config = pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF);
    pem::encode_config(&pem, config)
}

/// Convert a PEM‑encoded block to DER‑encoded bytes, requiring the given label.
pub fn pem_to_der(pem: impl AsRef<[u8]>, label: &str) -> Result<Vec<u8>> {
    let pem = pem::parse(pem)?;
    if pem.tag() != label {
        return Err(ThumbKitError::DecodingError(format!(
            "expected PEM label {label:?}, found {:?}",
            pem.tag()
        )));
    }
    Ok(pem.contents().to_vec())
}
