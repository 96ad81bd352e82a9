//! RSA key pairs for backup envelopes.
//!
//! The symmetric key that encrypts a backup payload is wrapped with
//! RSA-OAEP (SHA-256) under a recipient public key.  Key pairs exist
//! only as exported PEM files: the private half in PKCS#8, the public
//! half as SPKI, written to `<path>` and `<path>_pub`.
//!
//! There is no rotation or revocation.  Losing the private half strands
//! every backup wrapped with its public half.

use std::fs;
use std::path::{Path, PathBuf};

use rand_core::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::errors::{LockboxError, Result};
use crate::fsutil;

/// RSA modulus size in bits, sized for long-term secrecy.
const KEY_BITS: usize = 3072;

/// A freshly generated RSA key pair, held only long enough to export.
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    /// Generate a new 3072-bit RSA key pair.
    pub fn generate() -> Result<Self> {
        let private = RsaPrivateKey::new(&mut OsRng, KEY_BITS)
            .map_err(|e| LockboxError::KeyPair(format!("generation failed: {e}")))?;
        let public = RsaPublicKey::from(&private);
        Ok(Self { private, public })
    }

    /// The private half.
    pub fn private(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// The public half.
    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Export both halves as PEM files.
    ///
    /// The private half goes to `path` (mode 0600 on Unix), the public
    /// half to `<path>_pub`.  Returns the two paths written.
    pub fn save_pem(&self, path: &Path) -> Result<(PathBuf, PathBuf)> {
        let private_pem = self
            .private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| LockboxError::KeyPair(format!("private key encoding failed: {e}")))?;
        let public_pem = self
            .public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| LockboxError::KeyPair(format!("public key encoding failed: {e}")))?;

        let private_path = path.to_path_buf();
        let public_path = PathBuf::from(format!("{}_pub", path.display()));

        fsutil::write_private(&private_path, private_pem.as_bytes())?;
        fs::write(&public_path, public_pem.as_bytes())?;

        Ok((private_path, public_path))
    }
}

/// Load a PEM-encoded (SPKI) public key from disk.
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey> {
    let pem = fs::read_to_string(path)?;
    RsaPublicKey::from_public_key_pem(&pem)
        .map_err(|e| LockboxError::KeyPair(format!("invalid public key PEM: {e}")))
}

/// Load a PEM-encoded (PKCS#8) private key from disk.
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey> {
    let pem = fs::read_to_string(path)?;
    RsaPrivateKey::from_pkcs8_pem(&pem)
        .map_err(|e| LockboxError::KeyPair(format!("invalid private key PEM: {e}")))
}

/// Wrap a symmetric envelope key under a recipient public key.
pub fn wrap_key(public: &RsaPublicKey, key: &[u8]) -> Result<Vec<u8>> {
    public
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), key)
        .map_err(|e| LockboxError::Encryption(format!("key wrapping failed: {e}")))
}

/// Unwrap a symmetric envelope key with the matching private key.
///
/// OAEP decryption failure does not say why it failed; a mismatched
/// key surfaces as the same `Authentication` error as corrupted bytes.
pub fn unwrap_key(private: &RsaPrivateKey, wrapped: &[u8]) -> Result<Vec<u8>> {
    private
        .decrypt(Oaep::new::<Sha256>(), wrapped)
        .map_err(|_| LockboxError::Authentication)
}
