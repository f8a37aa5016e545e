use std::path::{Path, PathBuf};
use tracing::debug;
use crate::config::target_path;
use crate::error::{ForgeError, Result};
use crate::detect::LibcDetector;
use crate::platform::Platform;
use crate::resolver::{resolve, Resolution};

/// What a successful install did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub resolution: Resolution,
    /// The release artifact that was copied.
    pub source: PathBuf,
    /// The fixed path it was copied to.
    pub target: PathBuf,
}

/// Installs the forge binary for `platform` into `package_dir`.
///
/// Resolves the release artifact under `package_dir/bin/`, copies it to
/// `package_dir/forge[.exe]` and, outside Windows, makes it executable
/// (`0755`). Any previous install is overwritten, so rerunning is safe.
///
/// Nothing on disk is touched unless resolution succeeds and the source
/// artifact exists.
///
/// # Errors
///
/// * [`ForgeError::UnsupportedLibc`] – no Linux artifact for either libc flavor.
/// * [`ForgeError::BinaryNotFound`] – the resolved artifact is not on disk.
/// * [`ForgeError::InstallError`] – copying or changing permissions failed.
pub fn install<D: LibcDetector + ?Sized>(
    package_dir: &Path,
    platform: Platform,
    detector: &D,
) -> Result<InstallReport> {
    let resolution = resolve(platform, package_dir, detector)?;
    let source = package_dir.join(&resolution.relative_path);
    let target = target_path(package_dir);

    if !source.exists() {
        return Err(ForgeError::BinaryNotFound { path: source });
    }

    debug!(source = %source.display(), target = %target.display(), "copying artifact");
    std::fs::copy(&source, &target).map_err(|e| ForgeError::InstallError {
        path: target.clone(),
        source: e,
    })?;
    make_executable(&target)?;

    Ok(InstallReport {
        resolution,
        source,
        target,
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| ForgeError::InstallError {
            path: path.to_path_buf(),
            source: e,
        })
}

// Windows decides executability by extension.
#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
