use std::path::PathBuf;
use clap::Parser;
use forge_shim::Libc;

/// Installs the prebuilt forge binary matching this machine.
///
/// Meant to run as a package manager post-install hook; every flag is optional.
#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Directory holding `bin/` and receiving the installed `forge` binary.
    /// Defaults to `$FORGE_PACKAGE_DIR`, then to this executable's directory
    #[clap(long, value_name = "DIR")]
    pub(crate) package_dir: Option<PathBuf>,
    /// Use this libc flavor (gnu or musl) instead of asking `ldd`. Linux only
    #[clap(long, value_parser = parse_libc)]
    pub(crate) libc: Option<Libc>,
    /// Log resolution details to stderr
    #[clap(short, long)]
    pub(crate) verbose: bool,
}

fn parse_libc(value: &str) -> Result<Libc, String> {
    value.parse::<Libc>().map_err(|e| e.to_string())
}
