//! `lockbox <profile> generate` — create a random secret and store it.

use crate::cli::{confirm, open_backend, output, Cli};
use crate::config::Profile;
use crate::crypto::random_string;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, profile: &Profile, key: &str, length: usize) -> Result<()> {
    let secret = random_string(length, profile.secret_alphabet())?;

    let mut backend = open_backend(profile)?;

    if backend.check_exists(key)? && !confirm(cli, &format!("'{key}' exists, overwrite?"))? {
        output::info("Cancelled.");
        return backend.close();
    }

    backend.put(key, &secret, true)?;
    backend.close()?;

    output::success(&format!("Generated secret '{key}' ({length} characters)"));
    println!("{secret}");

    Ok(())
}
