//! `lockbox <profile> restore` — load secrets back from a backup file.

use std::path::Path;

use crate::backup::{open_backup, read_backup, restore_backup, RESTORE_SUFFIX};
use crate::cli::{open_backend, output, Cli};
use crate::config::Profile;
use crate::crypto::keypair;
use crate::errors::Result;

/// Execute the `restore` command.
pub fn execute(cli: &Cli, profile: &Profile, path: &str, key_path: Option<&str>) -> Result<()> {
    let envelope = read_backup(Path::new(path))?;

    let private_key = match key_path {
        Some(pem_path) => Some(keypair::load_private_key(Path::new(pem_path))?),
        None => None,
    };

    let items = open_backup(&envelope, private_key.as_ref())?;
    output::info(&format!(
        "Restoring {} key(s) into profile '{}' (each renamed with the '{RESTORE_SUFFIX}' suffix)",
        items.len(),
        cli.profile
    ));

    let mut backend = open_backend(profile)?;
    let report = restore_backup(items, backend.as_mut());
    backend.close()?;

    for (name, err) in &report.failures {
        output::warning(&format!("restore of '{name}' failed: {err}"));
    }
    output::success(&format!(
        "Restored {} key(s), {} failure(s)",
        report.restored,
        report.failures.len()
    ));
    Ok(())
}
