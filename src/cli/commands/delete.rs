//! `lockbox <profile> delete` — remove a secret.

use crate::cli::{confirm, open_backend, output, Cli};
use crate::config::Profile;
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, profile: &Profile, key: &str) -> Result<()> {
    let mut backend = open_backend(profile)?;

    if !backend.check_exists(key)? {
        // Delete is idempotent; just say so.
        output::info(&format!("'{key}' does not exist, nothing to delete."));
        return backend.close();
    }

    if !confirm(cli, &format!("Delete secret '{key}'?"))? {
        output::info("Cancelled.");
        return backend.close();
    }

    backend.delete(key)?;
    backend.close()?;

    output::success(&format!("Deleted secret '{key}'"));
    Ok(())
}
