//! `lockbox <profile> list` — display stored keys in a table.

use crate::cli::{open_backend, output, Cli};
use crate::config::Profile;
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, profile: &Profile, filter: Option<&str>) -> Result<()> {
    let mut backend = open_backend(profile)?;
    let mut keys = backend.list()?;
    backend.close()?;

    if let Some(term) = filter {
        keys.retain(|key| key.name.contains(term));
    }

    output::info(&format!(
        "profile '{}' — {} key(s)",
        cli.profile,
        keys.len()
    ));
    output::print_keys_table(&keys);

    Ok(())
}
