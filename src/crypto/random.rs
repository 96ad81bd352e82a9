//! Checked access to the OS random source.
//!
//! Salts, nonces, and envelope keys all come through here.  A random
//! source that cannot supply the requested bytes is a fatal condition:
//! the operation aborts instead of proceeding with partial entropy.

use rand_core::{OsRng, RngCore};

use crate::errors::{LockboxError, Result};

/// Fill a fresh buffer of `len` bytes from the OS CSPRNG.
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| LockboxError::Randomness(e.to_string()))?;
    Ok(buf)
}

/// Generate a random string of `len` characters drawn from `alphabet`.
///
/// Used by `lockbox generate` to create new secret values.  Rejection
/// sampling keeps the distribution uniform over the alphabet.
pub fn random_string(len: usize, alphabet: &str) -> Result<String> {
    if len == 0 {
        return Err(LockboxError::Command(
            "secret length must be at least 1".into(),
        ));
    }
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(LockboxError::Command("secret alphabet is empty".into()));
    }
    // Sampling draws one byte per character, so the alphabet cannot
    // exceed the byte range; past 256 the rejection limit collapses to
    // zero and no byte would ever be accepted.
    if chars.len() > 256 {
        return Err(LockboxError::Command(format!(
            "secret alphabet has {} characters, maximum is 256",
            chars.len()
        )));
    }

    // Largest multiple of the alphabet size that fits in a byte; bytes
    // at or above it are discarded to avoid modulo bias.
    let limit = 256 - (256 % chars.len());

    let mut out = String::with_capacity(len);
    let mut count = 0;
    while count < len {
        for byte in random_bytes(len)? {
            if (byte as usize) < limit {
                out.push(chars[byte as usize % chars.len()]);
                count += 1;
                if count == len {
                    break;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_returns_requested_length() {
        assert_eq!(random_bytes(16).unwrap().len(), 16);
        assert_eq!(random_bytes(0).unwrap().len(), 0);
    }

    #[test]
    fn random_bytes_differ_between_calls() {
        let a = random_bytes(32).unwrap();
        let b = random_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn random_string_respects_length_and_alphabet() {
        let s = random_string(40, "abc123").unwrap();
        assert_eq!(s.chars().count(), 40);
        assert!(s.chars().all(|c| "abc123".contains(c)));
    }

    #[test]
    fn random_string_rejects_zero_length() {
        assert!(random_string(0, "abc").is_err());
    }

    #[test]
    fn random_string_rejects_empty_alphabet() {
        assert!(random_string(8, "").is_err());
    }

    #[test]
    fn random_string_accepts_full_byte_alphabet() {
        let alphabet: String = (0u32..256).filter_map(char::from_u32).collect();
        assert_eq!(alphabet.chars().count(), 256);
        let s = random_string(8, &alphabet).unwrap();
        assert_eq!(s.chars().count(), 8);
    }

    #[test]
    fn random_string_rejects_oversized_alphabet() {
        let alphabet: String = (0x100u32..0x22c).filter_map(char::from_u32).collect();
        assert!(alphabet.chars().count() > 256);
        match random_string(8, &alphabet) {
            Err(LockboxError::Command(msg)) => assert!(msg.contains("256")),
            other => panic!("expected command error, got {other:?}"),
        }
    }
}
