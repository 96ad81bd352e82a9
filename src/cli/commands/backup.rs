//! `lockbox <profile> backup` — snapshot secrets to a portable file.

use std::path::Path;

use crate::backup::{create_backup, write_backup};
use crate::cli::{open_backend, output, Cli};
use crate::config::Profile;
use crate::crypto::keypair;
use crate::errors::Result;

/// Execute the `backup` command.
pub fn execute(
    cli: &Cli,
    profile: &Profile,
    path: &str,
    filter: Option<&str>,
    recipient: Option<&str>,
) -> Result<()> {
    let filter = filter.unwrap_or("");

    let public_key = match recipient {
        Some(pem_path) => Some(keypair::load_public_key(Path::new(pem_path))?),
        None => {
            output::warning("No recipient key given — the backup will be written in cleartext.");
            None
        }
    };

    let mut backend = open_backend(profile)?;
    let envelope = create_backup(backend.as_ref(), filter, public_key.as_ref())?;
    backend.close()?;

    write_backup(&envelope, Path::new(path))?;

    let mode = if envelope.is_encrypted() {
        "encrypted"
    } else {
        "cleartext"
    };
    output::success(&format!(
        "Backup of profile '{}' ({mode}) written to {path}",
        cli.profile
    ));
    Ok(())
}
