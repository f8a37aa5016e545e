use std::path::Path;
use tempfile::TempDir;
use forge_shim::{artifact_path, Arch, Libc, Os, Platform};

fn setup_package(contents: &[u8]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    stage(temp_dir.path(), Platform { os: Os::Linux, arch: Arch::X64, libc: Some(Libc::Gnu) }, contents);
    stage(temp_dir.path(), Platform { os: Os::Darwin, arch: Arch::Arm64, libc: None }, contents);
    temp_dir
}

fn stage(dir: &Path, platform: Platform, contents: &[u8]) {
    let full = dir.join(artifact_path(&platform).unwrap());
    std::fs::create_dir_all(full.parent().unwrap()).unwrap();
    std::fs::write(full, contents).unwrap();
}


#[cfg(test)]
mod tests {
    use forge_shim::{install, target_path, FixedLibc, ForgeError, LddProbe, Libc, Os, Platform};
    use crate::setup_package;

    #[test]
    fn test_install_linux_with_broken_probe_defaults_to_gnu() {
        let dir = setup_package(b"forge");
        let linux = Platform::from_host("linux", "x86_64").unwrap();
        let probe = LddProbe::with_program("forge-shim-missing-ldd");

        let report = install(dir.path(), linux, &probe).unwrap();
        assert_eq!(report.resolution.platform.libc, Some(Libc::Gnu));
        assert_eq!(report.resolution.substituted_from, None);
        assert!(target_path(dir.path()).exists());
    }

    #[test]
    fn test_install_macos_from_host_ids() {
        let dir = setup_package(b"forge");
        let mac = Platform::from_host("macos", "aarch64").unwrap();

        let report = install(dir.path(), mac, &FixedLibc(Libc::Musl)).unwrap();
        assert_eq!(report.resolution.platform.os, Os::Darwin);
        assert_eq!(report.resolution.platform.libc, None);
        assert!(report.source.ends_with("bin/darwin/arm64/forge-aarch64-apple-darwin"));
    }

    #[test]
    fn test_unsupported_host_fails_before_install() {
        let err = Platform::from_host("linux", "s390x").unwrap_err();
        assert!(matches!(err, ForgeError::UnsupportedArchitecture { .. }));
        assert!(err.to_string().contains("Supported architectures for linux: x64, arm64"));

        let err = Platform::from_host("aix", "ppc64").unwrap_err();
        assert!(err.to_string().contains("Supported platforms: darwin, linux, windows"));
    }

    #[test]
    fn test_windows_artifact_missing_is_binary_not_found() {
        let dir = setup_package(b"forge");
        let windows = Platform::from_host("windows", "x86_64").unwrap();
        let err = install(dir.path(), windows, &FixedLibc(Libc::Gnu)).unwrap_err();
        match err {
            ForgeError::BinaryNotFound { path } => {
                assert!(path.ends_with("bin/win32/x64/forge-x86_64-pc-windows-msvc.exe"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_install_then_launch_round_trip() {
        use forge_shim::launch;
        let script = b"#!/bin/sh\n[ \"$1\" = \"--version\" ] && [ $# -eq 1 ] && exit 0\nexit 5\n";
        let dir = setup_package(script);
        let linux = Platform::from_host("linux", "x86_64").unwrap();

        let report = install(dir.path(), linux, &FixedLibc(Libc::Gnu)).unwrap();
        assert_eq!(launch(&report.target, ["--version"]).unwrap(), 0);
        assert_eq!(launch(&report.target, ["--version", "extra"]).unwrap(), 5);
    }
}
