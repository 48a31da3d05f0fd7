//! Cryptographic Utilities
//!
//! HMAC-SHA256 signed tokens (`<payload>.<base64url signature>`) and
//! helpers for 32-byte secrets.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Length of signing secrets in bytes
pub const SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Secret must be {expected} bytes (got {actual})")]
    Length { expected: usize, actual: usize },
}

/// Generate a random signing secret
pub fn random_secret() -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Decode a standard-base64 secret of exactly [`SECRET_LEN`] bytes
pub fn secret_from_base64(encoded: &str) -> Result<[u8; SECRET_LEN], SecretError> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| SecretError::Length {
            expected: SECRET_LEN,
            actual: bytes.len(),
        })
}

/// Encode bytes as standard base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Sign `payload`, returning `<payload>.<signature>`
pub fn sign(secret: &[u8; SECRET_LEN], payload: &str) -> String {
    let mut mac = mac(secret);
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        payload,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a token produced by [`sign`] and return its payload
pub fn verify_signed<'a>(secret: &[u8; SECRET_LEN], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.rsplit_once('.')?;

    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;

    let mut mac = mac(secret);
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

fn mac(secret: &[u8; SECRET_LEN]) -> HmacSha256 {
    HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size")
}
