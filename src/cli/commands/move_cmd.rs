//! `lockbox <source-profile> move` — move a secret to another profile.
//!
//! Get from the source backend, Put into the target (with confirmation
//! when the target key exists), then Delete from the source.  Not
//! transactional: a failure after the Put leaves the secret in both
//! profiles.

use crate::cli::{confirm, load_profiles, open_backend, output, Cli};
use crate::config::Profile;
use crate::errors::{LockboxError, Result};

/// Execute the `move` command.
pub fn execute(
    cli: &Cli,
    source_profile: &Profile,
    key: &str,
    target_profile_name: &str,
    target_key: Option<&str>,
) -> Result<()> {
    let target_key = target_key.unwrap_or(key);

    let profiles = load_profiles(cli)?;
    let target_profile = profiles.get(target_profile_name)?;

    let mut source = open_backend(source_profile)?;
    let value = source.get(key)?;
    let value = String::from_utf8(value)
        .map_err(|_| LockboxError::Format(format!("value of '{key}' is not UTF-8")))?;

    let mut target = open_backend(target_profile)?;

    if target.check_exists(target_key)? {
        if !confirm(
            cli,
            &format!("'{target_key}' exists in '{target_profile_name}', overwrite?"),
        )? {
            output::info("Cancelled.");
            target.close()?;
            return source.close();
        }
        // Clear stale records so the moved value is the one reads see.
        target.delete(target_key)?;
    }

    target.put(target_key, &value, true)?;
    target.close()?;

    source.delete(key)?;
    source.close()?;

    output::success(&format!(
        "Moved '{key}' from '{}' to '{target_profile_name}' as '{target_key}'",
        cli.profile
    ));
    Ok(())
}
