//! Runtime settings shared by the installer and the launcher.
//!
//! Every value is resolved as: explicit flag, then environment variable,
//! then a built-in default.

use std::path::PathBuf;
use crate::error::{ForgeError, Result};
use crate::platform::{Libc, EXEC_SUFFIX};

/// Overrides the package directory (defaults to the running executable's directory).
pub const PACKAGE_DIR_ENV: &str = "FORGE_PACKAGE_DIR";
/// Pins the libc flavor instead of probing `ldd`.
pub const LIBC_ENV: &str = "FORGE_LIBC";
/// `tracing` filter directives, e.g. `forge_shim=debug`.
pub const LOG_ENV: &str = "FORGE_LOG";

/// Base name of the installed binary inside the package dir.
pub const BINARY_NAME: &str = "forge";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub package_dir: PathBuf,
    pub libc_override: Option<Libc>,
    pub log_filter: String,
}

impl Settings {
    /// Builds settings from optional flag values and the process environment.
    pub fn resolve(
        package_dir: Option<PathBuf>,
        libc: Option<Libc>,
        verbose: bool,
    ) -> Result<Settings> {
        let package_dir = match package_dir {
            Some(dir) => dir,
            None => get_package_dir()?,
        };
        let libc_override = match libc {
            Some(libc) => Some(libc),
            None => env_libc()?,
        };
        Ok(Settings {
            package_dir,
            libc_override,
            log_filter: log_filter(verbose),
        })
    }

    /// The fixed path the installer writes and the launcher runs.
    pub fn target_path(&self) -> PathBuf {
        target_path(&self.package_dir)
    }
}

/// `<package_dir>/forge`, with `.exe` appended on Windows.
pub fn target_path<P: AsRef<std::path::Path>>(package_dir: P) -> PathBuf {
    package_dir
        .as_ref()
        .join(format!("{BINARY_NAME}{EXEC_SUFFIX}"))
}

/// Returns `FORGE_PACKAGE_DIR` if set, else the directory of the running executable.
pub fn get_package_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(PACKAGE_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let exe = std::env::current_exe().map_err(ForgeError::PackageDirUnavailable)?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or_else(|| ForgeError::PackageDirUnavailable(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )))
}

fn env_libc() -> Result<Option<Libc>> {
    match std::env::var(LIBC_ENV) {
        Ok(value) if !value.trim().is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

/// `FORGE_LOG` if set, else `debug` when verbose and `warn` otherwise.
pub fn log_filter(verbose: bool) -> String {
    match std::env::var(LOG_ENV) {
        Ok(filter) if !filter.trim().is_empty() => filter,
        _ if verbose => "debug".to_string(),
        _ => "warn".to_string(),
    }
}
