//! Record types persisted in the local store file.
//!
//! Field names serialize in PascalCase to keep store files readable by
//! the other tooling that consumes them:
//!
//! ```json
//! { "Value": "<base64>", "KeyInfo": { "Name": "...", "CreatedAt": "...", "Owner": "...", "Info": "" } }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing a stored secret.  Names are unique by intent
/// only; the store itself never enforces uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    /// Best-effort attribution of who created the record; empty when
    /// the OS user could not be determined.
    #[serde(rename = "Owner")]
    pub owner: String,

    /// Optional free-text description.
    #[serde(rename = "Info")]
    pub info: String,
}

/// One encrypted secret: the opaque ciphertext blob plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// `salt || nonce || ciphertext+tag`, base64 in JSON.
    #[serde(
        rename = "Value",
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    pub value: Vec<u8>,

    #[serde(rename = "KeyInfo")]
    pub key_info: Key,
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
