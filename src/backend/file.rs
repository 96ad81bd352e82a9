//! The local encrypted file store.
//!
//! Secrets live in a single JSON document: an array of `SecretRecord`
//! in insertion order.  Every value is individually encrypted with the
//! envelope cipher under the store passphrase, so the file itself needs
//! no further protection beyond 0600 permissions.
//!
//! An empty store is a literal zero-byte file — never `null` or `[]` —
//! so a freshly created file and an emptied file look identical.
//!
//! Every mutating operation is a full read-modify-rewrite of the file.
//! There is no lock around that cycle: two processes writing the same
//! store race, and the later writer wins at whole-file granularity.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use zeroize::Zeroizing;

use crate::backend::record::{Key, SecretRecord};
use crate::backend::Backend;
use crate::config::Profile;
use crate::crypto::envelope;
use crate::errors::{LockboxError, Result};
use crate::fsutil;

pub struct FileStore {
    path: PathBuf,
    passphrase: Option<Zeroizing<String>>,
}

impl FileStore {
    /// Build a store for `profile`, using its configured location or
    /// the default `~/<project-id>.secrets.lockbox`.
    pub fn new(profile: &Profile, passphrase: Option<Zeroizing<String>>) -> Result<Self> {
        let path = match &profile.location {
            Some(location) if !location.is_empty() => PathBuf::from(location),
            _ => {
                let home = dirs::home_dir().ok_or_else(|| {
                    LockboxError::Config("cannot determine home directory for store location".into())
                })?;
                home.join(format!("{}.secrets.lockbox", profile.project_id))
            }
        };
        Ok(Self::at_path(path, passphrase))
    }

    /// Build a store at an explicit path.
    pub fn at_path(path: PathBuf, passphrase: Option<Zeroizing<String>>) -> Self {
        Self { path, passphrase }
    }

    /// Path of the store file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn passphrase(&self) -> Result<&[u8]> {
        self.passphrase
            .as_deref()
            .map(|p| p.as_bytes())
            .ok_or_else(|| LockboxError::Config("file store requires a passphrase".into()))
    }

    /// Create the store file empty (mode 0600) if it does not exist.
    fn ensure_exists(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => self.write_file(&[]),
            Err(e) => Err(e.into()),
        }
    }

    /// Read every record from disk, in stored order.
    ///
    /// A zero-length file is an empty store; anything else must be a
    /// valid JSON array of records.
    fn load(&self) -> Result<Vec<SecretRecord>> {
        self.ensure_exists()?;
        let data = fs::read(&self.path)?;
        if data.is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&data)
            .map_err(|e| LockboxError::Format(format!("malformed store file: {e}")))
    }

    /// Rewrite the whole store file.
    ///
    /// An empty record set writes literal zero bytes to preserve the
    /// "empty ≡ zero-byte file" invariant.
    fn save(&self, records: &[SecretRecord]) -> Result<()> {
        if records.is_empty() {
            return self.write_file(&[]);
        }
        let data = serde_json::to_vec(records)
            .map_err(|e| LockboxError::Serialization(format!("store records: {e}")))?;
        self.write_file(&data)
    }

    /// Write `data` via temp file + rename so readers never see a
    /// half-written store.
    fn write_file(&self, data: &[u8]) -> Result<()> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fsutil::write_private(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl Backend for FileStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let records = self.load()?;
        // First match in stored order wins; later same-named records
        // are shadowed until the earlier ones are deleted.
        for record in &records {
            if record.key_info.name == key {
                return envelope::decrypt(&record.value, self.passphrase()?);
            }
        }
        Err(LockboxError::NotFound(key.to_string()))
    }

    fn list(&self) -> Result<Vec<Key>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|record| record.key_info)
            .collect())
    }

    fn check_exists(&self, key: &str) -> Result<bool> {
        Ok(self
            .load()?
            .iter()
            .any(|record| record.key_info.name == key))
    }

    /// Append a new record; `overwrite` is ignored and duplicates are
    /// not rejected.  A later record under an existing name stays
    /// invisible to `get` until the earlier match is deleted.
    fn put(&mut self, key: &str, value: &str, _overwrite: bool) -> Result<()> {
        self.ensure_exists()?;
        let encrypted = envelope::encrypt(value.as_bytes(), self.passphrase()?)?;

        let record = SecretRecord {
            value: encrypted,
            key_info: Key {
                name: key.to_string(),
                created_at: Utc::now(),
                owner: whoami::fallible::realname().unwrap_or_default(),
                info: String::new(),
            },
        };

        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut records = self.load()?;
        records.retain(|record| record.key_info.name != key);
        self.save(&records)
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn requires_secret(&self) -> bool {
        true
    }
}
