//! # Forge Shim Core Library
//!
//! This crate contains the logic behind the two small programs that ship with the `forge` package:
//! `forge-install`, run once by the package manager after install, and `forge-launch`, run every time
//! the wrapped `forge` command is invoked.
//!
//! The package carries one prebuilt forge binary per platform under `bin/<os>/<arch>/`. The installer
//! picks the right one for the host (OS, CPU architecture and, on Linux, libc flavor) and copies it to
//! a fixed path next to itself. The launcher runs that fixed path, forwarding arguments, standard
//! streams and exit status.
//!
//! ## Modules Overview
//! - [`platform`] – Os / Arch / Libc and host detection
//! - [`detect`] – libc flavor detection behind the [`LibcDetector`] capability
//! - [`resolver`] – Static platform → artifact table and artifact resolution
//! - [`installer`] – Copying the resolved artifact into place
//! - [`launcher`] – Running the installed binary and relaying its exit code
//! - [`config`] – Package directory, overrides and log filter
//! - [`report`] – Operator-facing status lines and logging setup
//! - [`error`] – The [`ForgeError`] type

pub mod platform;
pub mod detect;
pub mod resolver;
pub mod installer;
pub mod launcher;
pub mod config;
pub mod report;
pub mod error;

pub use platform::*;
pub use detect::*;
pub use resolver::*;
pub use installer::*;
pub use launcher::*;
pub use config::*;
pub use error::*;
