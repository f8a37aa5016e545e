//! Detection of the C runtime flavor on Linux hosts.
//!
//! Detection is a capability ([`LibcDetector`]) so the resolver can be driven
//! by a fixed answer in tests or by an operator override, without spawning
//! `ldd`.

use std::ffi::OsString;
use std::process::Command;
use tracing::{debug, warn};
use crate::error::{ForgeError, Result};
use crate::platform::Libc;
use crate::report;

/// Answers which libc flavor the host uses.
///
/// Implementations never fail: when nothing can be learned they return
/// [`Libc::Gnu`], the more common runtime.
pub trait LibcDetector {
    fn detect_libc_flavor(&self) -> Libc;
}

/// Always answers with the wrapped flavor.
#[derive(Debug, Clone, Copy)]
pub struct FixedLibc(pub Libc);

impl LibcDetector for FixedLibc {
    fn detect_libc_flavor(&self) -> Libc {
        self.0
    }
}

/// Asks the dynamic linker via `ldd --version`.
#[derive(Debug, Clone)]
pub struct LddProbe {
    program: OsString,
}

impl Default for LddProbe {
    fn default() -> Self {
        Self { program: OsString::from("ldd") }
    }
}

impl LddProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes with a different program than `ldd`. It is invoked with
    /// `--version` all the same.
    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self { program: program.into() }
    }

    /// Runs the probe, surfacing why it could not classify anything.
    pub fn probe(&self) -> Result<Libc> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| ForgeError::LibcDetectionFailed(
                format!("could not run {}: {e}", self.program.to_string_lossy())
            ))?;
        // musl's ldd prints its banner to stderr and exits non-zero
        let text = if output.stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            String::from_utf8_lossy(&output.stderr).into_owned()
        };
        debug!(program = %self.program.to_string_lossy(), status = ?output.status.code(), "libc probe finished");
        if text.trim().is_empty() {
            return Err(ForgeError::LibcDetectionFailed(
                format!("{} --version printed nothing", self.program.to_string_lossy())
            ));
        }
        Ok(Libc::classify(&text))
    }
}

impl LibcDetector for LddProbe {
    fn detect_libc_flavor(&self) -> Libc {
        match self.probe() {
            Ok(libc) => libc,
            Err(e) => {
                warn!(error = %e, fallback = %Libc::Gnu, "libc detection failed");
                report::warning(&format!("{e}, defaulting to glibc."));
                Libc::Gnu
            }
        }
    }
}
