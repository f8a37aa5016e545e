use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::error::{ForgeError, Result};
use crate::detect::LibcDetector;
use crate::platform::{Arch, Libc, Os, Platform};
use crate::report;

/// Directory under the package dir holding the prebuilt release artifacts.
pub const ARTIFACT_DIR: &str = "bin";

/// A release artifact picked for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The platform the artifact was built for. On Linux this carries the
    /// libc flavor actually used, after any substitution.
    pub platform: Platform,
    /// Artifact path relative to the package dir:
    /// `bin/<os-dir>/<arch>/<artifact>`.
    pub relative_path: PathBuf,
    /// The flavor that was detected but had no artifact on disk, if the
    /// alternate flavor was used instead.
    pub substituted_from: Option<Libc>,
}

impl Resolution {
    /// The libc flavor the host was detected (or configured) to use.
    pub fn detected_libc(&self) -> Option<Libc> {
        self.substituted_from.or(self.platform.libc)
    }
}

/// Release artifact file name for a platform.
///
/// Returns `None` only for Linux without a libc flavor, which is never a
/// valid lookup key.
pub fn artifact_name(platform: &Platform) -> Option<&'static str> {
    let name = match (platform.os, platform.arch, platform.libc) {
        (Os::Darwin, Arch::X64, _) => "forge-x86_64-apple-darwin",
        (Os::Darwin, Arch::Arm64, _) => "forge-aarch64-apple-darwin",
        (Os::Linux, Arch::X64, Some(Libc::Gnu)) => "forge-x86_64-unknown-linux-gnu",
        (Os::Linux, Arch::X64, Some(Libc::Musl)) => "forge-x86_64-unknown-linux-musl",
        (Os::Linux, Arch::Arm64, Some(Libc::Gnu)) => "forge-aarch64-unknown-linux-gnu",
        (Os::Linux, Arch::Arm64, Some(Libc::Musl)) => "forge-aarch64-unknown-linux-musl",
        (Os::Linux, _, None) => return None,
        (Os::Windows, Arch::X64, _) => "forge-x86_64-pc-windows-msvc.exe",
        (Os::Windows, Arch::Arm64, _) => "forge-aarch64-pc-windows-msvc.exe",
    };
    Some(name)
}

/// Artifact path relative to the package dir, see [`Resolution::relative_path`].
pub fn artifact_path(platform: &Platform) -> Option<PathBuf> {
    let name = artifact_name(platform)?;
    Some(
        PathBuf::from(ARTIFACT_DIR)
            .join(platform.os.dir_name())
            .join(platform.arch.as_str())
            .join(name),
    )
}

/// Resolves the release artifact to install for `platform`.
///
/// On Linux the libc flavor is asked from `detector`. If the artifact for
/// that flavor is missing from `package_dir`, the other flavor's artifact is
/// used when present, with a warning.
///
/// # Arguments
///
/// * `platform` – The host platform, as returned by [`Platform::current`]. Any libc it carries is ignored.
/// * `package_dir` – Directory holding the `bin/` artifact tree.
/// * `detector` – Source of the libc flavor. Only consulted on Linux.
///
/// # Errors
///
/// Returns [`ForgeError::UnsupportedLibc`] if neither Linux flavor has an
/// artifact on disk. Non-Linux artifacts are not checked for existence here.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use forge_shim::{resolve, LddProbe, Platform};
///
/// let platform = Platform::current().unwrap();
/// let resolution = resolve(platform, Path::new("."), &LddProbe::new()).unwrap();
/// assert!(resolution.relative_path.starts_with("bin"));
/// ```
pub fn resolve<D: LibcDetector + ?Sized>(
    platform: Platform,
    package_dir: &Path,
    detector: &D,
) -> Result<Resolution> {
    if platform.os != Os::Linux {
        let platform = Platform { libc: None, ..platform };
        let relative_path = artifact_path(&platform)
            .ok_or_else(|| unsupported_libc(platform, Libc::Gnu))?;
        debug!(%platform, path = %relative_path.display(), "resolved artifact");
        return Ok(Resolution { platform, relative_path, substituted_from: None });
    }

    let preferred = detector.detect_libc_flavor();
    debug!(libc = %preferred, "libc flavor detected");

    let candidates = [preferred, preferred.alternative()];
    for libc in candidates {
        let candidate = platform.with_libc(libc);
        let relative_path = artifact_path(&candidate)
            .ok_or_else(|| unsupported_libc(platform, preferred))?;
        if !package_dir.join(&relative_path).exists() {
            debug!(path = %relative_path.display(), "artifact missing on disk");
            continue;
        }
        let substituted_from = (libc != preferred).then_some(preferred);
        if substituted_from.is_some() {
            warn!(%preferred, used = %libc, path = %relative_path.display(), "libc artifact substituted");
            report::warning(&format!("Binary for {preferred} not found, trying {libc} instead"));
        }
        debug!(platform = %candidate, path = %relative_path.display(), "resolved artifact");
        return Ok(Resolution {
            platform: candidate,
            relative_path,
            substituted_from,
        });
    }
    Err(unsupported_libc(platform, preferred))
}

fn unsupported_libc(platform: Platform, libc: Libc) -> ForgeError {
    ForgeError::UnsupportedLibc {
        os: platform.os,
        arch: platform.arch,
        libc,
        supported: Libc::ALL.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FixedLibc;
    use tempfile::tempdir;

    fn stage(dir: &Path, platform: Platform) -> PathBuf {
        let rel = artifact_path(&platform).unwrap();
        let full = dir.join(&rel);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, b"binary").unwrap();
        rel
    }

    fn linux(arch: Arch) -> Platform {
        Platform { os: Os::Linux, arch, libc: None }
    }

    #[test]
    fn test_every_key_has_a_well_formed_path() {
        for os in Os::ALL {
            for arch in os.supported_archs() {
                let flavors: Vec<Option<Libc>> = match os {
                    Os::Linux => Libc::ALL.iter().copied().map(Some).collect(),
                    _ => vec![None],
                };
                for libc in flavors {
                    let platform = Platform { os, arch, libc };
                    let path = artifact_path(&platform).unwrap();
                    let parts: Vec<_> = path.iter().map(|p| p.to_string_lossy().to_string()).collect();
                    assert_eq!(parts.len(), 4, "{path:?}");
                    assert_eq!(parts[0], "bin");
                    assert_eq!(parts[1], os.dir_name());
                    assert_eq!(parts[2], arch.as_str());
                    assert!(parts[3].starts_with("forge-"));
                    if let Some(libc) = libc {
                        assert!(parts[3].ends_with(libc.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_artifact_names_are_unique() {
        let mut names = vec![];
        for os in Os::ALL {
            for arch in Arch::ALL {
                for libc in [None, Some(Libc::Gnu), Some(Libc::Musl)] {
                    if let Some(name) = artifact_name(&Platform { os, arch, libc }) {
                        names.push(name);
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_linux_requires_libc_key() {
        assert_eq!(artifact_name(&linux(Arch::X64)), None);
    }

    #[test]
    fn test_windows_lives_under_win32() {
        let platform = Platform { os: Os::Windows, arch: Arch::X64, libc: None };
        assert_eq!(
            artifact_path(&platform).unwrap(),
            PathBuf::from("bin/win32/x64/forge-x86_64-pc-windows-msvc.exe")
        );
    }

    #[test]
    fn test_non_linux_ignores_detector_and_disk() {
        let dir = tempdir().unwrap();
        let platform = Platform { os: Os::Darwin, arch: Arch::Arm64, libc: None };
        let resolution = resolve(platform, dir.path(), &FixedLibc(Libc::Musl)).unwrap();
        assert_eq!(resolution.platform.libc, None);
        assert_eq!(
            resolution.relative_path,
            PathBuf::from("bin/darwin/arm64/forge-aarch64-apple-darwin")
        );
        assert_eq!(resolution.substituted_from, None);
    }

    #[test]
    fn test_linux_uses_detected_flavor() {
        let dir = tempdir().unwrap();
        stage(dir.path(), linux(Arch::X64).with_libc(Libc::Gnu));
        let musl = stage(dir.path(), linux(Arch::X64).with_libc(Libc::Musl));

        let resolution = resolve(linux(Arch::X64), dir.path(), &FixedLibc(Libc::Musl)).unwrap();
        assert_eq!(resolution.relative_path, musl);
        assert_eq!(resolution.platform.libc, Some(Libc::Musl));
        assert_eq!(resolution.substituted_from, None);
    }

    #[test]
    fn test_linux_falls_back_to_other_flavor() {
        let dir = tempdir().unwrap();
        let musl = stage(dir.path(), linux(Arch::Arm64).with_libc(Libc::Musl));

        let resolution = resolve(linux(Arch::Arm64), dir.path(), &FixedLibc(Libc::Gnu)).unwrap();
        assert_eq!(resolution.relative_path, musl);
        assert_eq!(resolution.platform.libc, Some(Libc::Musl));
        assert_eq!(resolution.substituted_from, Some(Libc::Gnu));
        assert_eq!(resolution.detected_libc(), Some(Libc::Gnu));
    }

    #[test]
    fn test_substitution_emits_warn_event() {
        let dir = tempdir().unwrap();
        stage(dir.path(), linux(Arch::X64).with_libc(Libc::Musl));

        let (resolution, logs) = report::capture_logs(|| {
            resolve(linux(Arch::X64), dir.path(), &FixedLibc(Libc::Gnu)).unwrap()
        });
        assert_eq!(resolution.substituted_from, Some(Libc::Gnu));
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("libc artifact substituted"), "{logs}");
        assert!(logs.contains("preferred=gnu"), "{logs}");
        assert!(logs.contains("used=musl"), "{logs}");
    }

    #[test]
    fn test_exact_match_emits_no_warn_event() {
        let dir = tempdir().unwrap();
        stage(dir.path(), linux(Arch::X64).with_libc(Libc::Gnu));

        let (_, logs) = report::capture_logs(|| {
            resolve(linux(Arch::X64), dir.path(), &FixedLibc(Libc::Gnu)).unwrap()
        });
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn test_linux_without_any_artifact_is_unsupported_libc() {
        let dir = tempdir().unwrap();
        let err = resolve(linux(Arch::X64), dir.path(), &FixedLibc(Libc::Gnu)).unwrap_err();
        match err {
            ForgeError::UnsupportedLibc { os, arch, libc, supported } => {
                assert_eq!(os, Os::Linux);
                assert_eq!(arch, Arch::X64);
                assert_eq!(libc, Libc::Gnu);
                assert_eq!(supported, vec![Libc::Gnu, Libc::Musl]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
