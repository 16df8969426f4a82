//! Generates a fresh RSA test key pair for `thumbkit::fixture`.
//!
//! Writes `public.key` (SPKI DER) and `private.key` (PKCS#8 DER) to the
//! current directory and prints the constants to paste into `src/fixture.rs`.

use thumbkit::fixture::FixtureConstants;
use thumbkit::key::KeyPair;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let key_pair = KeyPair::generate_rsa(2048)?;

    std::fs::write("public.key", key_pair.public_key().to_spki_der()?)?;
    std::fs::write("private.key", key_pair.private_key().to_pkcs8_der()?)?;

    println!("{}", FixtureConstants::from_public_key(key_pair.public_key())?);

    Ok(())
}
