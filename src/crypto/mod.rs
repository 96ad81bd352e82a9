//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - Passphrase-based authenticated encryption of single values (`envelope`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - A checked interface to the OS random source (`random`)
//! - RSA key pair generation and PEM export for backups (`keypair`)

pub mod envelope;
pub mod kdf;
pub mod keypair;
pub mod random;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, ...};
pub use envelope::{decrypt, encrypt, MIN_BLOB_LEN};
pub use keypair::KeyPair;
pub use random::{random_bytes, random_string};
