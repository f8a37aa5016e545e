use anyhow::Result;
use forge_shim::report;
use forge_shim::{install, FixedLibc, LddProbe, Libc, LibcDetector, Os, Platform, Settings};
use crate::cli::CLI;

pub fn execute(cli: CLI) -> Result<()> {
    let settings = Settings::resolve(cli.package_dir, cli.libc, cli.verbose)?;
    report::init_tracing(&settings.log_filter);
    tracing::debug!(?settings, "installer settings");

    let platform = Platform::current()?;
    let libc = select_libc(platform, settings.libc_override, &LddProbe::new());
    execute_install(&settings, platform, &FixedLibc(libc))
}

/// Settles the libc flavor up front so it is reported before anything is
/// resolved. Off Linux the answer is unused and `ldd` is never run.
pub fn select_libc(
    platform: Platform,
    libc_override: Option<Libc>,
    detector: &dyn LibcDetector,
) -> Libc {
    if platform.os != Os::Linux {
        return libc_override.unwrap_or(Libc::Gnu);
    }
    match libc_override {
        Some(libc) => {
            report::info(&format!("Using libc type: {libc} (override)"));
            libc
        }
        None => {
            let libc = detector.detect_libc_flavor();
            report::info(&format!("Detected libc type: {libc}"));
            libc
        }
    }
}

pub fn execute_install(
    settings: &Settings,
    platform: Platform,
    detector: &dyn LibcDetector,
) -> Result<()> {
    let result = install(&settings.package_dir, platform, detector)?;
    report::success(&format!(
        "Successfully installed forge for {}",
        result.resolution.platform
    ));
    tracing::debug!(source = %result.source.display(), target = %result.target.display(), "install finished");
    Ok(())
}
