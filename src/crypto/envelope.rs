//! Passphrase-based authenticated encryption of a single value.
//!
//! Each call to `encrypt` derives a fresh key with Argon2id from the
//! passphrase and a random salt, then seals the plaintext with
//! XChaCha20-Poly1305 under a random 24-byte nonce.  The extended nonce
//! makes purely random per-value nonces safe without tracking state.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte salt | 24-byte nonce | ciphertext + 16-byte auth tag ]

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use zeroize::Zeroize;

use crate::crypto::kdf::{derive_key, generate_salt, SALT_LEN};
use crate::crypto::random::random_bytes;
use crate::errors::{LockboxError, Result};

/// Size of the XChaCha20-Poly1305 nonce in bytes.
const NONCE_LEN: usize = 24;

/// The shortest well-formed blob: salt + nonce, nothing else.
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN;

/// Encrypt `plaintext` under a passphrase-derived key.
///
/// Returns `salt || nonce || ciphertext+tag` as a single blob so the
/// caller only needs to store one opaque value.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
    let salt = generate_salt()?;
    let mut key = derive_key(passphrase, &salt)?;

    let cipher = XChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| LockboxError::Encryption(format!("invalid key length: {e}")))?;
    key.zeroize();

    let nonce_bytes = random_bytes(NONCE_LEN)?;
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LockboxError::Encryption(format!("seal failed: {e}")))?;

    let mut blob = Vec::with_capacity(MIN_BLOB_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob produced by `encrypt`.
///
/// A blob shorter than salt + nonce is a `Format` error.  A failed tag
/// check is always the same `Authentication` error, whether the cause
/// was a wrong passphrase or tampered bytes — the distinction would be
/// an oracle.
pub fn decrypt(blob: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < MIN_BLOB_LEN {
        return Err(LockboxError::Format(format!(
            "ciphertext too short: {} bytes, need at least {MIN_BLOB_LEN}",
            blob.len()
        )));
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let mut key = derive_key(passphrase, salt)?;
    let cipher = XChaCha20Poly1305::new_from_slice(&key)
        .map_err(|_| LockboxError::Authentication)?;
    key.zeroize();

    let nonce = XNonce::from_slice(nonce_bytes);
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| LockboxError::Authentication)
}
