//! Passphrase-based key derivation using Argon2id.
//!
//! The cost parameters are fixed on purpose: the passphrase is the sole
//! secret input, so a stored salt alone must be enough to re-derive the
//! key.  Changing these values would orphan every existing store.

use argon2::{Algorithm, Argon2, Params, Version};

use crate::crypto::random::random_bytes;
use crate::errors::{LockboxError, Result};

/// Length of the salt prepended to every encrypted value.
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for XChaCha20-Poly1305).
pub const KEY_LEN: usize = 32;

/// Argon2id time cost (iterations).
const TIME_COST: u32 = 3;

/// Argon2id memory cost in KiB (32 MiB).
const MEMORY_KIB: u32 = 32 * 1024;

/// Argon2id parallelism degree.
const PARALLELISM: u32 = 4;

/// Derive a 32-byte encryption key from a passphrase and salt.
///
/// The same passphrase + salt always produce the same key.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(MEMORY_KIB, TIME_COST, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| LockboxError::KeyDerivation(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut key)
        .map_err(|e| LockboxError::KeyDerivation(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<Vec<u8>> {
    random_bytes(SALT_LEN)
}
