use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Store / backend errors ---
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("message authentication failed — wrong passphrase or corrupted data")]
    Authentication,

    #[error("invalid data format: {0}")]
    Format(String),

    // --- Crypto errors ---
    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("secure random source failed: {0}")]
    Randomness(String),

    #[error("key pair error: {0}")]
    KeyPair(String),

    // --- Config errors ---
    #[error("config error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("command failed: {0}")]
    Command(String),
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
