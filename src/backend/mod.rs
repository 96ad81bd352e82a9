//! Secret backends — capability contract + local store implementation.
//!
//! Every backend (the local encrypted file store and each remote
//! adapter) exposes the same operation set so the command layer and the
//! backup code can stay backend-agnostic.  Remote vendor adapters live
//! behind this seam and are not part of this crate; only the local
//! `FileStore` is built in.

pub mod file;
pub mod record;

pub use file::FileStore;
pub use record::{Key, SecretRecord};

use zeroize::Zeroizing;

use crate::config::Profile;
use crate::errors::{LockboxError, Result};

/// The uniform operation set every secret backend implements.
///
/// The scope (profile, project id, store location) and any secret the
/// backend needs are injected as typed values at construction, not
/// threaded through every call or pushed in through a stringly-typed
/// parameter channel.
pub trait Backend {
    /// Fetch and decrypt the value for `key`.
    ///
    /// Fails with `NotFound` if no such key exists, and with
    /// `Authentication` if it exists but cannot be decrypted.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// List metadata for every stored key.  Values are never decrypted.
    fn list(&self) -> Result<Vec<Key>>;

    /// Check whether `key` exists, by name only.
    fn check_exists(&self, key: &str) -> Result<bool>;

    /// Store `value` under `key`.
    ///
    /// Remote backends honor `overwrite` (reject an existing key when
    /// it is false); the local store always appends a new record and
    /// ignores the flag.
    fn put(&mut self, key: &str, value: &str, overwrite: bool) -> Result<()>;

    /// Delete every record named `key`.  Deleting an absent key is not
    /// an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Release any held connection or resources.
    fn close(&mut self) -> Result<()>;

    /// Whether this backend needs a passphrase before values can be
    /// read or written.  Callers use this instead of inspecting the
    /// concrete backend type.
    fn requires_secret(&self) -> bool;
}

/// Construct the backend selected by `profile`.
///
/// `passphrase` must be supplied for backends whose kind
/// `requires_secret`; it is ignored by the rest.  Remote adapters are
/// compiled out of this build and report a config error.
pub fn open_backend(
    profile: &Profile,
    passphrase: Option<Zeroizing<String>>,
) -> Result<Box<dyn Backend>> {
    match profile.backend.as_str() {
        "file" => Ok(Box::new(FileStore::new(profile, passphrase)?)),
        other => Err(LockboxError::Config(format!(
            "backend '{other}' is not available in this build"
        ))),
    }
}

/// Whether the backend named in `profile` needs a passphrase.
///
/// Queried before construction so the command layer knows when to
/// prompt.
pub fn backend_requires_secret(profile: &Profile) -> bool {
    profile.backend == "file"
}
