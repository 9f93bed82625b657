//! Platform helpers for locating the svn client and the working copy.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_SVN_COMMAND;
use crate::core::WpSvnError;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the platform-specific svn executable name.
///
/// Windows installs (TortoiseSVN command line tools, SlikSVN) ship `svn.exe`.
#[must_use]
pub const fn get_svn_command() -> &'static str {
    if is_windows() {
        "svn.exe"
    } else {
        DEFAULT_SVN_COMMAND
    }
}

/// Checks if a command is available, either as a path or in `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Resolve the target directory to an absolute path.
///
/// Relative paths are resolved against `base` (normally the process working
/// directory). Fails with [`WpSvnError::DirectoryNotFound`] when the path does not
/// exist or is not a directory, carrying the path as the user typed it.
pub fn resolve_target_dir(target: &Path, base: &Path) -> Result<PathBuf> {
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    };

    let not_found = || WpSvnError::DirectoryNotFound {
        path: target.display().to_string(),
    };

    let resolved = joined.canonicalize().map_err(|_| not_found())?;
    if !resolved.is_dir() {
        return Err(not_found().into());
    }

    tracing::debug!("Resolved target directory {} -> {}", target.display(), resolved.display());
    Ok(resolved)
}
