use std::path::PathBuf;
use thiserror::Error;

use crate::platform::{Arch, Libc, Os};

pub type Result<T> = std::result::Result<T, ForgeError>;

/// Every way installing or launching forge can fail.
///
/// All variants except [`ForgeError::LibcDetectionFailed`] are terminal: the
/// binaries print them and exit with status 1.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Unsupported platform: {found}\nSupported platforms: {}", join(.supported))]
    UnsupportedPlatform {
        found: String,
        supported: Vec<Os>,
    },

    #[error(
        "Unsupported architecture: {found} for platform {os}\nSupported architectures for {os}: {}",
        join(.supported)
    )]
    UnsupportedArchitecture {
        os: Os,
        found: String,
        supported: Vec<Arch>,
    },

    #[error(
        "Unsupported libc type: {libc} for {os}/{arch}\nSupported libc types: {}",
        join(.supported)
    )]
    UnsupportedLibc {
        os: Os,
        arch: Arch,
        libc: Libc,
        supported: Vec<Libc>,
    },

    #[error("Binary not found: {}\nIf this is a new architecture or platform, please check the repository for updates.", .path.display())]
    BinaryNotFound { path: PathBuf },

    #[error("Forge binary not found at: {}", .path.display())]
    InstalledBinaryMissing { path: PathBuf },

    #[error("Error installing binary to {}: {source}", .path.display())]
    InstallError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {}: {source}", .path.display())]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not detect libc type: {0}")]
    LibcDetectionFailed(String),

    #[error("Invalid libc type: {0} (expected gnu or musl)")]
    InvalidLibc(String),

    #[error("Could not determine package directory: {0}")]
    PackageDirUnavailable(#[source] std::io::Error),
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
