//! Integration tests for the local file store.

use std::fs;
use std::path::PathBuf;

use lockbox::backend::{Backend, FileStore};
use lockbox::errors::LockboxError;
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Helper: a store at a fresh temp path with the given passphrase.
fn store(passphrase: &str) -> (TempDir, FileStore, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.secrets");
    let store = FileStore::at_path(path.clone(), Some(Zeroizing::new(passphrase.to_string())));
    (dir, store, path)
}

// ---------------------------------------------------------------------------
// Empty-store invariant
// ---------------------------------------------------------------------------

#[test]
fn fresh_store_is_an_empty_zero_byte_file() {
    let (_dir, store, path) = store("hunter2");

    assert!(store.list().unwrap().is_empty());

    // The file now exists and is exactly zero bytes — not "null", not "[]".
    let data = fs::read(&path).unwrap();
    assert!(data.is_empty(), "expected zero bytes, got {data:?}");
}

#[cfg(unix)]
#[test]
fn store_file_is_created_with_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store, path) = store("hunter2");
    store.list().unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// ---------------------------------------------------------------------------
// Put / Get / List / Delete end-to-end
// ---------------------------------------------------------------------------

#[test]
fn put_get_delete_end_to_end() {
    let (_dir, mut store, path) = store("hunter2");

    store.put("db-pass", "s3cr3t", false).unwrap();

    // Exactly one record on disk, as a JSON array of objects.
    let data = fs::read(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&data).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["KeyInfo"]["Name"], "db-pass");

    assert_eq!(store.get("db-pass").unwrap(), b"s3cr3t");
    assert!(store.check_exists("db-pass").unwrap());

    // Wrong passphrase: same store file, different credentials.
    let wrong = FileStore::at_path(path.clone(), Some(Zeroizing::new("wrong".to_string())));
    match wrong.get("db-pass") {
        Err(LockboxError::Authentication) => {}
        other => panic!("expected Authentication, got {other:?}"),
    }

    // Delete empties the store back to a zero-byte file.
    store.delete("db-pass").unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(fs::read(&path).unwrap().is_empty());
}

#[test]
fn get_missing_key_is_not_found() {
    let (_dir, store, _path) = store("hunter2");
    match store.get("nope") {
        Err(LockboxError::NotFound(name)) => assert_eq!(name, "nope"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn delete_missing_key_is_idempotent() {
    let (_dir, mut store, _path) = store("hunter2");
    store.delete("never-existed").unwrap();
    store.delete("never-existed").unwrap();
}

#[test]
fn list_preserves_insertion_order() {
    let (_dir, mut store, _path) = store("hunter2");

    store.put("charlie", "3", false).unwrap();
    store.put("alpha", "1", false).unwrap();
    store.put("bravo", "2", false).unwrap();

    let names: Vec<String> = store.list().unwrap().into_iter().map(|k| k.name).collect();
    assert_eq!(names, ["charlie", "alpha", "bravo"]);
}

#[test]
fn put_records_metadata() {
    let (_dir, mut store, _path) = store("hunter2");
    store.put("token", "t0k3n", false).unwrap();

    let keys = store.list().unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].name, "token");
    assert_eq!(keys[0].info, "");
    // Owner is best-effort; either the OS user or empty.
    let age = chrono::Utc::now() - keys[0].created_at;
    assert!(age.num_seconds() < 60);
}

// ---------------------------------------------------------------------------
// Duplicate names: put appends, get resolves to the first match
// ---------------------------------------------------------------------------

#[test]
fn duplicate_put_appends_and_get_returns_first() {
    let (_dir, mut store, _path) = store("hunter2");

    store.put("dup", "first", false).unwrap();
    // The overwrite flag is ignored by the local store.
    store.put("dup", "second", true).unwrap();

    let keys = store.list().unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.name == "dup"));

    assert_eq!(store.get("dup").unwrap(), b"first");
}

#[test]
fn delete_removes_every_record_with_the_name() {
    let (_dir, mut store, _path) = store("hunter2");

    store.put("dup", "first", false).unwrap();
    store.put("dup", "second", false).unwrap();
    store.put("other", "kept", false).unwrap();

    store.delete("dup").unwrap();

    let names: Vec<String> = store.list().unwrap().into_iter().map(|k| k.name).collect();
    assert_eq!(names, ["other"]);
    assert_eq!(store.get("other").unwrap(), b"kept");
}

// ---------------------------------------------------------------------------
// Malformed store content
// ---------------------------------------------------------------------------

#[test]
fn malformed_store_file_is_a_format_error() {
    let (_dir, store, path) = store("hunter2");
    fs::write(&path, b"this is not json").unwrap();

    match store.list() {
        Err(LockboxError::Format(_)) => {}
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn list_never_needs_the_passphrase() {
    let (_dir, mut store, path) = store("hunter2");
    store.put("k", "v", false).unwrap();

    // A store handle without any passphrase can still list and check.
    let no_pass = FileStore::at_path(path, None);
    assert_eq!(no_pass.list().unwrap().len(), 1);
    assert!(no_pass.check_exists("k").unwrap());

    // But get must fail before ever reaching the cipher.
    assert!(no_pass.get("k").is_err());
}
