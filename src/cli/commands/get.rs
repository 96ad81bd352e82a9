//! `lockbox <profile> get` — retrieve and print a single secret's value.

use std::fs;
use std::path::Path;

use crate::cli::{open_backend, Cli};
use crate::config::Profile;
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(_cli: &Cli, profile: &Profile, key: &str, output_path: Option<&str>) -> Result<()> {
    let mut backend = open_backend(profile)?;
    let value = backend.get(key)?;
    backend.close()?;

    match output_path {
        Some(path) => fs::write(Path::new(path), &value)?,
        None => println!("{}", String::from_utf8_lossy(&value)),
    }

    Ok(())
}
