//! Entry point of the wrapped `forge` command.
//!
//! Takes no flags of its own: every argument goes to the installed binary.

use forge_shim::report;
use forge_shim::{get_package_dir, host_identifiers, launch, log_filter, target_path, ForgeError};

fn main() {
    report::init_tracing(&log_filter(false));
    std::process::exit(run());
}

fn run() -> i32 {
    let package_dir = match get_package_dir() {
        Ok(dir) => dir,
        Err(e) => {
            report::error(&e.to_string());
            return 1;
        }
    };
    let target = target_path(&package_dir);
    match launch(&target, std::env::args_os().skip(1)) {
        Ok(code) => code,
        Err(e @ ForgeError::InstalledBinaryMissing { .. }) => {
            let (os, arch) = host_identifiers();
            report::error(&format!(
                "{e}\nPlease try reinstalling the forge package.\nSystem information: {os} ({arch})"
            ));
            1
        }
        Err(e) => {
            report::error(&e.to_string());
            1
        }
    }
}
