//! Integration tests for the Lockbox CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are avoided by setting `LOCKBOX_PASSPHRASE`
//! and passing `--quiet` for confirmations.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: get a Command pointing at the lockbox binary.
fn lockbox() -> Command {
    Command::cargo_bin("lockbox").expect("binary should exist")
}

/// Helper: a temp dir with a profiles file pointing a `test` profile
/// at a store inside the same dir.  Returns (dir, config path, store path).
fn test_profile() -> (TempDir, String, String) {
    let tmp = TempDir::new().unwrap();
    let store_path = tmp.path().join("test.secrets");
    let config_path = tmp.path().join("lockbox.toml");
    fs::write(
        &config_path,
        format!(
            "[test]\nbackend = \"file\"\nproject_id = \"cli-test\"\nlocation = \"{}\"\n",
            store_path.display()
        ),
    )
    .unwrap();
    (
        tmp,
        config_path.to_string_lossy().into_owned(),
        store_path.to_string_lossy().into_owned(),
    )
}

#[test]
fn help_flag_shows_usage() {
    lockbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-backend secrets manager"))
        .stdout(predicate::str::contains("put"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("restore"))
        .stdout(predicate::str::contains("keygen"));
}

#[test]
fn version_flag_shows_version() {
    lockbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn unknown_profile_fails_with_pointer_at_config() {
    let (_tmp, config, _store) = test_profile();

    lockbox()
        .args(["--config", config.as_str(), "nosuch", "list"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such profile"));
}

#[test]
fn put_get_list_delete_end_to_end() {
    let (_tmp, config, store) = test_profile();

    // put (inline value; --quiet skips the overwrite confirmation path)
    lockbox()
        .args(["--config", config.as_str(), "--quiet", "test", "put", "db-pass", "s3cr3t"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    // get prints the value
    lockbox()
        .args(["--config", config.as_str(), "test", "get", "db-pass"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cr3t"));

    // get under the wrong passphrase fails closed
    lockbox()
        .args(["--config", config.as_str(), "test", "get", "db-pass"])
        .env("LOCKBOX_PASSPHRASE", "wrong")
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication"));

    // list shows the key name
    lockbox()
        .args(["--config", config.as_str(), "test", "list"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("db-pass"));

    // delete empties the store back to a zero-byte file
    lockbox()
        .args(["--config", config.as_str(), "--quiet", "test", "delete", "db-pass"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    assert!(fs::read(&store).unwrap().is_empty());
}

#[test]
fn put_reads_value_from_stdin() {
    let (_tmp, config, _store) = test_profile();

    lockbox()
        .args(["--config", config.as_str(), "--quiet", "test", "put", "piped"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .write_stdin("from-stdin\n")
        .assert()
        .success();

    lockbox()
        .args(["--config", config.as_str(), "test", "get", "piped"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-stdin"));
}

#[test]
fn generate_prints_a_secret_of_requested_length() {
    let (_tmp, config, _store) = test_profile();

    let output = lockbox()
        .args(["--config", config.as_str(), "--quiet", "test", "generate", "gen-key", "24"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // Last non-empty stdout line is the generated secret.
    let text = String::from_utf8_lossy(&output);
    let secret = text.lines().rev().find(|l| !l.trim().is_empty()).unwrap();
    assert_eq!(secret.trim().chars().count(), 24);
}

#[test]
fn backup_and_restore_roundtrip_cleartext() {
    let (tmp, config, _store) = test_profile();
    let backup_path = tmp
        .path()
        .join("snap.backup")
        .to_string_lossy()
        .into_owned();

    lockbox()
        .args(["--config", config.as_str(), "--quiet", "test", "put", "a", "1"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    lockbox()
        .args(["--config", config.as_str(), "test", "backup", "--path", backup_path.as_str()])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    lockbox()
        .args(["--config", config.as_str(), "test", "restore", "--path", backup_path.as_str()])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 1 key(s)"));

    // Restored under the renamed key, original untouched.
    lockbox()
        .args(["--config", config.as_str(), "test", "get", "a_restore"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
}

#[test]
fn completions_generates_bash_script() {
    lockbox()
        .args(["-", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockbox"));
}

#[test]
fn confirmed_put_over_existing_key_replaces_value() {
    let (_tmp, config, store) = test_profile();

    for value in ["first", "second"] {
        lockbox()
            .args(["--config", config.as_str(), "--quiet", "test", "put", "db-pass", value])
            .env("LOCKBOX_PASSPHRASE", "hunter2")
            .assert()
            .success();
    }

    // The confirmed overwrite clears the earlier record, so the new
    // value is the one reads return and only one record remains.
    lockbox()
        .args(["--config", config.as_str(), "test", "get", "db-pass"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("first").not());

    let raw = fs::read_to_string(&store).unwrap();
    assert_eq!(raw.matches("db-pass").count(), 1);
}

#[test]
fn confirmed_move_onto_existing_key_replaces_value() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("lockbox.toml");
    fs::write(
        &config_path,
        format!(
            "[src]\nbackend = \"file\"\nproject_id = \"mv-src\"\nlocation = \"{}\"\n\n\
             [dst]\nbackend = \"file\"\nproject_id = \"mv-dst\"\nlocation = \"{}\"\n",
            tmp.path().join("src.secrets").display(),
            tmp.path().join("dst.secrets").display(),
        ),
    )
    .unwrap();
    let config = config_path.to_string_lossy().into_owned();

    lockbox()
        .args(["--config", config.as_str(), "--quiet", "src", "put", "token", "moved-value"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();
    lockbox()
        .args(["--config", config.as_str(), "--quiet", "dst", "put", "token", "stale-value"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    lockbox()
        .args(["--config", config.as_str(), "--quiet", "src", "move", "token", "dst"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success();

    // The moved value is what the target returns, not the stale one.
    lockbox()
        .args(["--config", config.as_str(), "dst", "get", "token"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("moved-value"))
        .stdout(predicate::str::contains("stale-value").not());

    // And the source no longer has it.
    lockbox()
        .args(["--config", config.as_str(), "src", "get", "token"])
        .env("LOCKBOX_PASSPHRASE", "hunter2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
