use std::fmt;
use std::str::FromStr;
use crate::error::{ForgeError, Result};

/// Suffix of the installed executable on the current host.
#[cfg(windows)]
pub const EXEC_SUFFIX: &str = ".exe";
#[cfg(not(windows))]
pub const EXEC_SUFFIX: &str = "";

/// Operating systems forge ships binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

/// CPU architectures forge ships binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X64,
    Arm64,
}

/// C runtime a Linux binary was linked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Libc {
    Gnu,
    Musl,
}

impl Os {
    pub const ALL: [Os; 3] = [Os::Darwin, Os::Linux, Os::Windows];

    /// Parses a host OS identifier. Accepts both Rust (`macos`) and
    /// release-layout (`darwin`, `win32`) spellings.
    pub fn from_host(id: &str) -> Option<Os> {
        match id {
            "macos" | "darwin" => Some(Os::Darwin),
            "linux" => Some(Os::Linux),
            "windows" | "win32" => Some(Os::Windows),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "windows",
        }
    }

    /// Directory name used for this OS under `bin/` in the release layout.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "win32",
        }
    }

    /// Architectures with a release artifact on this OS.
    pub fn supported_archs(&self) -> Vec<Arch> {
        match self {
            Os::Darwin | Os::Linux | Os::Windows => Arch::ALL.to_vec(),
        }
    }
}

impl Arch {
    pub const ALL: [Arch; 2] = [Arch::X64, Arch::Arm64];

    pub fn from_host(id: &str) -> Option<Arch> {
        match id {
            "x86_64" | "x64" => Some(Arch::X64),
            "aarch64" | "arm64" => Some(Arch::Arm64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl Libc {
    pub const ALL: [Libc; 2] = [Libc::Gnu, Libc::Musl];

    /// The other flavor, tried when this one has no artifact on disk.
    pub fn alternative(&self) -> Libc {
        match self {
            Libc::Gnu => Libc::Musl,
            Libc::Musl => Libc::Gnu,
        }
    }

    /// Classifies the text printed by `ldd --version`.
    pub fn classify(ldd_output: &str) -> Libc {
        if ldd_output.to_lowercase().contains("musl") {
            Libc::Musl
        } else {
            Libc::Gnu
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Libc::Gnu => "gnu",
            Libc::Musl => "musl",
        }
    }
}

impl FromStr for Libc {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gnu" | "glibc" => Ok(Libc::Gnu),
            "musl" => Ok(Libc::Musl),
            _ => Err(ForgeError::InvalidLibc(s.to_string())),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Libc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The platform descriptor a binary is picked for.
///
/// `libc` is only ever `Some` on Linux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
    pub libc: Option<Libc>,
}

impl Platform {
    /// Parses raw host identifiers, failing at the first unsupported level.
    ///
    /// The returned platform carries no libc; the resolver fills that in.
    pub fn from_host(os: &str, arch: &str) -> Result<Platform> {
        let os_kind = Os::from_host(os).ok_or_else(|| ForgeError::UnsupportedPlatform {
            found: os.to_string(),
            supported: Os::ALL.to_vec(),
        })?;
        let arch_kind = Arch::from_host(arch)
            .filter(|a| os_kind.supported_archs().contains(a))
            .ok_or_else(|| ForgeError::UnsupportedArchitecture {
                os: os_kind,
                found: arch.to_string(),
                supported: os_kind.supported_archs(),
            })?;
        Ok(Platform {
            os: os_kind,
            arch: arch_kind,
            libc: None,
        })
    }

    /// The platform of the running process, without libc.
    pub fn current() -> Result<Platform> {
        Platform::from_host(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn with_libc(self, libc: Libc) -> Platform {
        Platform {
            libc: match self.os {
                Os::Linux => Some(libc),
                _ => None,
            },
            ..self
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)?;
        if let Some(libc) = self.libc {
            write!(f, " ({libc})")?;
        }
        Ok(())
    }
}

/// Raw OS and architecture identifiers of this host, for diagnostics that
/// must work even when the platform itself is unsupported.
pub fn host_identifiers() -> (&'static str, &'static str) {
    (std::env::consts::OS, std::env::consts::ARCH)
}
