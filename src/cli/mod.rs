//! CLI module — Clap argument parser, shared prompts, output helpers,
//! and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::backend::{self, Backend};
use crate::config::{Profile, Profiles};
use crate::errors::{LockboxError, Result};

/// Lockbox CLI: multi-backend secrets manager.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Multi-backend secrets manager with a local encrypted store",
    version
)]
pub struct Cli {
    /// Path to the profiles file (default: ~/.lockbox.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Profile to operate on (a table in the profiles file)
    pub profile: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a secret (appends a new record in the local store)
    Put {
        /// Secret name (e.g. parent/db-pass)
        key: String,
        /// Secret value (read from stdin if omitted)
        value: Option<String>,
    },

    /// Retrieve and print a secret's value
    Get {
        /// Secret name
        key: String,
        /// Write the value to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List stored keys and their metadata
    List {
        /// Only show keys containing this term
        filter: Option<String>,
    },

    /// Delete a secret
    Delete {
        /// Secret name
        key: String,
    },

    /// Generate a random secret, store it, and print it
    Generate {
        /// Secret name
        key: String,
        /// Length of the generated secret
        length: usize,
    },

    /// Move a secret to another profile
    Move {
        /// Secret name in the source profile
        key: String,
        /// Target profile name
        target_profile: String,
        /// Name in the target profile (defaults to the source name)
        target_key: Option<String>,
    },

    /// Write a snapshot of secrets to a backup file
    Backup {
        /// Destination file for the backup
        #[arg(long)]
        path: String,
        /// Only include keys containing this term
        filter: Option<String>,
        /// Public key PEM; when given the backup is hybrid-encrypted
        #[arg(long)]
        recipient: Option<String>,
    },

    /// Restore secrets from a backup file
    Restore {
        /// Backup file to restore from
        #[arg(long)]
        path: String,
        /// Private key PEM (required for encrypted backups)
        #[arg(long)]
        key: Option<String>,
    },

    /// Generate an RSA key pair for encrypted backups
    Keygen {
        /// Output path for the private key ("<path>_pub" gets the public half)
        path: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load the profiles file named by `--config`, or the default location.
pub fn load_profiles(cli: &Cli) -> Result<Profiles> {
    let path = match &cli.config {
        Some(path) => std::path::PathBuf::from(path),
        None => Profiles::default_path()?,
    };
    Profiles::load(&path)
}

/// Get the store passphrase, trying in order:
/// 1. `LOCKBOX_PASSPHRASE` env var (CI/CD)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory
/// on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("LOCKBOX_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter store passphrase")
        .interact()
        .map_err(|e| LockboxError::Command(format!("passphrase prompt: {e}")))?;

    if pw.is_empty() {
        return Err(LockboxError::Command(
            "passphrase must have at least one character".into(),
        ));
    }
    Ok(Zeroizing::new(pw))
}

/// Construct the backend for `profile`, prompting for a passphrase
/// first when the selected backend kind needs one.
pub fn open_backend(profile: &Profile) -> Result<Box<dyn Backend>> {
    let passphrase = if backend::backend_requires_secret(profile) {
        Some(prompt_passphrase()?)
    } else {
        None
    };
    backend::open_backend(profile, passphrase)
}

/// Ask a yes/no question; `--quiet` answers yes without prompting.
pub fn confirm(cli: &Cli, message: &str) -> Result<bool> {
    if cli.quiet {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| LockboxError::Command(format!("confirm prompt: {e}")))
}
