//! `lockbox <profile> put` — store a secret.

use std::io::{self, IsTerminal, Read};

use crate::cli::{confirm, open_backend, output, Cli};
use crate::config::Profile;
use crate::errors::Result;

/// Execute the `put` command.
pub fn execute(cli: &Cli, profile: &Profile, key: &str, value: Option<&str>) -> Result<()> {
    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end_matches('\n').to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {key}"))
            .interact()
            .map_err(|e| crate::errors::LockboxError::Command(format!("input prompt: {e}")))?
    };

    let mut backend = open_backend(profile)?;

    if backend.check_exists(key)? {
        if !confirm(cli, &format!("'{key}' exists, overwrite?"))? {
            output::info("Cancelled.");
            return backend.close();
        }
        // The store appends and reads back the oldest record, so the
        // existing ones have to go for the new value to win.
        backend.delete(key)?;
    }

    backend.put(key, &secret_value, true)?;
    backend.close()?;

    output::success(&format!("Secret '{key}' stored in profile '{}'", cli.profile));
    Ok(())
}
