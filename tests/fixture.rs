#![cfg(feature = "fixtures")]

mod util;

use thumbkit::error::ThumbKitError;
use thumbkit::fixture::{self, E, KTY, N, THUMBPRINT};
use thumbkit::jwk::JwkParameters;
use thumbkit::key::{KeyType, PrivateKey, PublicKey};
use thumbkit::thumbprint_of;

/// The pinned public key decodes and hashes to the pinned thumbprint.
#[test]
fn pinned_public_key_thumbprint() {
    let public_key =
        PublicKey::from_spki_der(&util::resource("public.key"), KeyType::Rsa).unwrap();

    assert_eq!(thumbprint_of(&public_key).unwrap(), THUMBPRINT);
}

/// Extraction yields exactly the pinned members.
#[test]
fn pinned_public_key_parameters() {
    let pair = fixture::key_pair().unwrap();
    let parameters = JwkParameters::from_public_key(pair.public_key()).unwrap();

    assert_eq!(parameters.len(), 3);
    assert_eq!(parameters.get("kty"), Some(KTY));
    assert_eq!(parameters.get("e"), Some(E));
    assert_eq!(parameters.get("n"), Some(N));
    // 2048-bit modulus: 256 bytes, unpadded base64url
    assert_eq!(N.len(), 342);
}

#[test]
fn pinned_canonical_json() {
    let pair = fixture::key_pair().unwrap();
    let canonical = JwkParameters::from_public_key(pair.public_key())
        .unwrap()
        .canonical_json()
        .unwrap();

    assert_eq!(
        String::from_utf8(canonical).unwrap(),
        format!(r#"{{"e":"{E}","kty":"{KTY}","n":"{N}"}}"#)
    );
}

#[test]
fn thumbprint_is_deterministic() {
    let first = fixture::key_pair().unwrap();
    let second = fixture::key_pair().unwrap();

    assert_eq!(
        first.public_key().thumbprint().unwrap(),
        second.public_key().thumbprint().unwrap()
    );
}

/// Building SPKI bytes from the pinned members and decoding them again gives
/// back the same members, and the same bytes as the resource.
#[test]
fn members_survive_spki_round_trip() {
    let parameters = JwkParameters::from_members([("kty", KTY), ("n", N), ("e", E)]);
    let der = parameters.to_public_key().unwrap().to_spki_der().unwrap();
    assert_eq!(der, util::resource("public.key"));

    let decoded = PublicKey::from_spki_der(&der, KeyType::Rsa).unwrap();
    assert_eq!(JwkParameters::from_public_key(&decoded).unwrap(), parameters);
}

#[test]
fn pem_public_key_matches_der() {
    let from_pem =
        PublicKey::from_spki_pem(&util::resource_string("public.pem"), KeyType::Rsa).unwrap();
    assert_eq!(from_pem.thumbprint().unwrap(), THUMBPRINT);
}

#[test]
fn private_key_decodes() {
    let private =
        PrivateKey::from_pkcs8_der(&util::resource("private.key"), KeyType::Rsa).unwrap();
    assert_eq!(private.key_type(), KeyType::Rsa);

    let der = private.to_pkcs8_der().unwrap();
    let again = PrivateKey::decode_pkcs8_der(&der).unwrap();
    assert_eq!(PublicKey::from(&again), PublicKey::from(&private));
}

#[test]
fn private_key_is_not_a_public_key() {
    let err =
        PublicKey::from_spki_der(&util::resource("private.key"), KeyType::Rsa).unwrap_err();
    assert!(matches!(err, ThumbKitError::DecodingError(_)));
}

#[test]
fn malformed_spki_is_rejected() {
    let mut der = util::resource("public.key");
    der.truncate(der.len() - 10);

    let inputs: [&[u8]; 4] = [&der, &[], b"garbage", &[0x30, 0x00]];
    for bytes in inputs {
        let err = PublicKey::from_spki_der(bytes, KeyType::Rsa).unwrap_err();
        assert!(matches!(err, ThumbKitError::DecodingError(_)), "{err:?}");
    }
}

#[test]
fn rsa_key_is_not_an_ec_key() {
    let err = PublicKey::from_spki_der(&util::resource("public.key"), KeyType::EcdsaP256)
        .unwrap_err();
    assert!(matches!(err, ThumbKitError::DecodingError(_)));
}

#[test]
fn pinned_certificate_decodes() {
    let cert = fixture::certificate().unwrap();
    assert_eq!(cert.subject(), "CN=example.com");
    assert!(cert.not_before() < cert.not_after());
}
