//! `lockbox <profile> keygen` — generate an RSA key pair for backups.

use std::path::Path;

use crate::cli::output;
use crate::crypto::KeyPair;
use crate::errors::Result;

/// Default file name for the private half of the backup key pair.
const DEFAULT_KEY_PATH: &str = "lockbox_backupkey_rsa";

/// Execute the `keygen` command.
pub fn execute(path: Option<&str>) -> Result<()> {
    let path = path.unwrap_or(DEFAULT_KEY_PATH);

    output::info("Generating 3072-bit RSA key pair, this can take a moment...");
    let pair = KeyPair::generate()?;
    let (private_path, public_path) = pair.save_pem(Path::new(path))?;

    output::success(&format!(
        "Key pair saved: '{}' (private), '{}' (public)",
        private_path.display(),
        public_path.display()
    ));
    output::tip("Pass the public half to `backup --recipient`; guard the private half.");
    Ok(())
}
