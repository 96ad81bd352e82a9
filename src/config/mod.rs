//! Profile configuration, loaded from a TOML file.
//!
//! Each top-level table names a profile and selects a backend plus its
//! connection parameters:
//!
//! ```toml
//! [staging]
//! backend = "file"
//! project_id = "myteam"
//! location = "/home/me/staging.secrets.lockbox"   # optional
//!
//! [prod]
//! backend = "vault"
//! project_id = "myteam"
//! vault_url = "https://vault.internal:8200"
//! mount_path = "secret"
//! ```
//!
//! The parsed `Profiles` value is passed explicitly into the command
//! layer and backend constructors; nothing reads ambient globals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LockboxError, Result};

/// Default alphabet for `lockbox generate`.
pub const DEFAULT_SECRET_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One named scope descriptor: which backend to use and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Backend kind: "file" for the local store; remote kinds are
    /// handled by external adapters.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Project or namespace identifier within the backend.
    #[serde(default)]
    pub project_id: String,

    /// Explicit store file location (local backend only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Vault server URL (vault backend only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_url: Option<String>,

    /// Vault KV mount path (vault backend only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,

    /// Alphabet used by `generate` for new secret values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_alphabet: Option<String>,
}

fn default_backend() -> String {
    "file".to_string()
}

impl Profile {
    /// The alphabet `generate` should draw from.
    pub fn secret_alphabet(&self) -> &str {
        self.secret_alphabet
            .as_deref()
            .unwrap_or(DEFAULT_SECRET_ALPHABET)
    }
}

/// All profiles from the config file, by name.
#[derive(Debug, Clone, Default)]
pub struct Profiles {
    profiles: HashMap<String, Profile>,
    path: PathBuf,
}

impl Profiles {
    /// Load profiles from `path`.
    ///
    /// A missing file yields an empty profile set (every lookup then
    /// fails with a pointer at the path); a file that exists but does
    /// not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                profiles: HashMap::new(),
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let profiles: HashMap<String, Profile> = toml::from_str(&contents)
            .map_err(|e| LockboxError::Config(format!("failed to parse {}: {e}", path.display())))?;

        Ok(Self {
            profiles,
            path: path.to_path_buf(),
        })
    }

    /// The default config file location: `~/.lockbox.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LockboxError::Config("cannot determine home directory".into()))?;
        Ok(home.join(".lockbox.toml"))
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&Profile> {
        self.profiles.get(name).ok_or_else(|| {
            LockboxError::Config(format!(
                "no such profile '{name}' — check {}",
                self.path.display()
            ))
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
