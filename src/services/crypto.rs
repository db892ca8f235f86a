use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::prelude::*;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute a keyed HMAC-SHA256 digest and return it as a hexadecimal string
///
/// Reset artifacts are digested with the account's security stamp as the
/// key, so rotating the stamp invalidates every outstanding artifact.
pub fn hmac_sha256_hex(key: &str, value: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(value.as_bytes());
    let result = mac.finalize();
    format!("{:x}", result.into_bytes())
}

/// Generate a cryptographically secure single-use reset artifact
///
/// 32 random bytes, base64-encoded.
pub fn generate_reset_artifact() -> String {
    let mut rng = rand::rng();
    let random_bytes: [u8; 32] = rng.random();
    general_purpose::STANDARD.encode(random_bytes)
}
