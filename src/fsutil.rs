//! Filesystem helper for files that must stay owner-only.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::errors::Result;

/// Write `data` to `path` with mode 0600 from the moment the file
/// exists.  Creating with the default umask and chmodding afterwards
/// would leave a window where other users can read the contents; a
/// pre-existing file is re-permissioned before any data lands in it.
pub(crate) fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(data)?;
    Ok(())
}
