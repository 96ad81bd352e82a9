//! Portable backup envelopes.
//!
//! A backup is a snapshot of secrets from one backend, written to a
//! single file for offline transport:
//!
//! ```json
//! { "Payload": "<base64>", "WrappedKey": "<base64, optional>" }
//! ```
//!
//! Without a recipient key the payload is the serialized name→value
//! mapping in the clear.  With one, the mapping is sealed by the
//! envelope cipher under a fresh random 32-byte key, and that key is
//! wrapped with RSA-OAEP under the recipient public key — classic
//! hybrid encryption.  A wrapped backup cannot be restored without the
//! matching private half.
//!
//! Restore is best-effort and non-transactional: each entry is Put
//! under a renamed key, failures are collected, and the run continues.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::backend::record::{base64_decode, base64_encode};
use crate::backend::Backend;
use crate::crypto::{envelope, keypair, random_bytes};
use crate::errors::{LockboxError, Result};

/// Length of the random symmetric envelope key.
const ENVELOPE_KEY_LEN: usize = 32;

/// Suffix appended to every restored key so a restore never silently
/// overwrites a live secret of the same name.
pub const RESTORE_SUFFIX: &str = "_restore";

/// The serialized form of a backup file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupEnvelope {
    /// Either the cleartext serialized mapping, or its AEAD ciphertext
    /// when a recipient key was supplied.
    #[serde(
        rename = "Payload",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub payload: Vec<u8>,

    /// The symmetric envelope key, RSA-OAEP-encrypted under the
    /// recipient public key.  Absent for cleartext backups.
    #[serde(
        rename = "WrappedKey",
        default,
        skip_serializing_if = "Option::is_none",
        with = "opt_base64"
    )]
    pub wrapped_key: Option<Vec<u8>>,
}

impl BackupEnvelope {
    /// Whether this backup needs a private key to restore.
    pub fn is_encrypted(&self) -> bool {
        self.wrapped_key.is_some()
    }
}

/// The outcome of a restore run.
pub struct RestoreReport {
    /// Number of entries successfully written to the destination.
    pub restored: usize,
    /// Per-key failures, in mapping order.
    pub failures: Vec<(String, LockboxError)>,
}

/// Snapshot `source` into a backup envelope.
///
/// Keys whose name contains `filter` are included (an empty filter
/// matches everything); each value is fetched through the source's own
/// `get`, so it arrives decrypted.  Duplicate-named records collapse to
/// the first match, consistent with `get` resolution order.
pub fn create_backup(
    source: &dyn Backend,
    filter: &str,
    recipient: Option<&RsaPublicKey>,
) -> Result<BackupEnvelope> {
    let mut items: BTreeMap<String, String> = BTreeMap::new();

    for key in source.list()? {
        if !key.name.contains(filter) || items.contains_key(&key.name) {
            continue;
        }
        let value = source.get(&key.name)?;
        let value = String::from_utf8(value)
            .map_err(|_| LockboxError::Format(format!("value of '{}' is not UTF-8", key.name)))?;
        items.insert(key.name, value);
    }

    let mapping = serde_json::to_vec(&items)
        .map_err(|e| LockboxError::Serialization(format!("backup mapping: {e}")))?;

    match recipient {
        None => Ok(BackupEnvelope {
            payload: mapping,
            wrapped_key: None,
        }),
        Some(public) => {
            let envelope_key = random_bytes(ENVELOPE_KEY_LEN)?;
            let payload = envelope::encrypt(&mapping, &envelope_key)?;
            let wrapped_key = keypair::wrap_key(public, &envelope_key)?;
            Ok(BackupEnvelope {
                payload,
                wrapped_key: Some(wrapped_key),
            })
        }
    }
}

/// Serialize a backup envelope to `path`.
pub fn write_backup(envelope: &BackupEnvelope, path: &Path) -> Result<()> {
    let data = serde_json::to_vec(envelope)
        .map_err(|e| LockboxError::Serialization(format!("backup envelope: {e}")))?;
    fs::write(path, data)?;
    Ok(())
}

/// Parse a backup envelope from `path`.
pub fn read_backup(path: &Path) -> Result<BackupEnvelope> {
    let data = fs::read(path)?;
    serde_json::from_slice(&data)
        .map_err(|e| LockboxError::Format(format!("malformed backup file: {e}")))
}

/// Recover the name→value mapping from an envelope.
///
/// Cleartext envelopes parse directly.  Encrypted ones need the private
/// key: a mismatched key fails the OAEP unwrap (or the AEAD open) with
/// `Authentication`, corruption with `Format` or `Authentication`.
pub fn open_backup(
    envelope: &BackupEnvelope,
    private: Option<&RsaPrivateKey>,
) -> Result<BTreeMap<String, String>> {
    let mapping = match &envelope.wrapped_key {
        None => envelope.payload.clone(),
        Some(wrapped) => {
            let private = private.ok_or_else(|| {
                LockboxError::Command(
                    "backup is encrypted — provide the private key with --key".into(),
                )
            })?;
            let envelope_key = keypair::unwrap_key(private, wrapped)?;
            envelope::decrypt(&envelope.payload, &envelope_key)?
        }
    };

    serde_json::from_slice(&mapping)
        .map_err(|e| LockboxError::Format(format!("malformed backup mapping: {e}")))
}

/// Put every entry of `items` into `destination` under a `_restore`
/// suffixed name.  A failed Put is recorded and does not stop the rest.
pub fn restore_backup(
    items: BTreeMap<String, String>,
    destination: &mut dyn Backend,
) -> RestoreReport {
    let mut report = RestoreReport {
        restored: 0,
        failures: Vec::new(),
    };

    for (name, value) in items {
        match destination.put(&format!("{name}{RESTORE_SUFFIX}"), &value, false) {
            Ok(()) => report.restored += 1,
            Err(e) => report.failures.push((name, e)),
        }
    }

    report
}

// Optional base64 field: absent in JSON when None.
mod opt_base64 {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match data {
            Some(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => BASE64
                .decode(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
