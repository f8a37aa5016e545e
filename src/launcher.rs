use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;
use crate::error::{ForgeError, Result};

/// Runs the installed forge binary and waits for it to exit.
///
/// Arguments are passed through unchanged and in order. The child shares
/// this process's stdin, stdout and stderr. On Windows the binary is started
/// through `cmd /D /S /C "<command line>"` so the shell resolves it as it
/// would from a prompt; on every other OS it is executed directly.
///
/// There is no timeout: interactive sessions can run for as long as they like.
///
/// # Returns
///
/// The exit code to mirror, see [`exit_code`].
///
/// # Errors
///
/// * [`ForgeError::InstalledBinaryMissing`] – `target` does not exist. Nothing is spawned.
/// * [`ForgeError::LaunchFailed`] – the OS refused to start the process.
///
/// # Example
///
/// ```no_run
/// use forge_shim::{launch, target_path};
///
/// let code = launch(&target_path("/opt/forge"), ["--version"]).unwrap();
/// std::process::exit(code);
/// ```
pub fn launch<I, S>(target: &Path, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    if !target.exists() {
        return Err(ForgeError::InstalledBinaryMissing {
            path: target.to_path_buf(),
        });
    }
    let mut command = command_for(target, args);
    debug!(command = ?command, "launching");
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ForgeError::LaunchFailed {
            path: target.to_path_buf(),
            source: e,
        })?;
    debug!(?status, "child exited");
    Ok(exit_code(status))
}

fn command_for<I, S>(target: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        let mut line = quote_cmd_arg(&target.as_os_str().to_string_lossy(), true);
        for arg in args {
            line.push(' ');
            line.push_str(&quote_cmd_arg(&arg.as_ref().to_string_lossy(), false));
        }
        // with /S, cmd strips exactly the outer pair of quotes
        let mut command = Command::new("cmd.exe");
        command.args(["/D", "/S", "/C"]).raw_arg(format!("\"{line}\""));
        command
    }
    #[cfg(not(windows))]
    {
        let mut command = Command::new(target);
        command.args(args);
        command
    }
}

/// Quotes one word of a `cmd` command line with the MSVC runtime rules.
///
/// Words holding whitespace, quotes or `cmd` operators are quoted so they
/// reach the child as one argument. `always` forces quoting.
#[cfg(any(windows, test))]
fn quote_cmd_arg(arg: &str, always: bool) -> String {
    let needs_quotes = always
        || arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '&' | '|' | '<' | '>' | '^' | '(' | ')'));
    if !needs_quotes {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(std::iter::repeat_n('\\', backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    quoted.extend(std::iter::repeat_n('\\', backslashes * 2));
    quoted.push('"');
    quoted
}

/// Maps a child's exit status to the code this process should exit with.
///
/// Normal exits are mirrored. A child killed by a signal yields
/// `128 + signal`, as shells report it. Anything else yields `1`, never `0`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
