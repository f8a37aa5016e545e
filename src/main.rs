mod cli;
mod execute;

use std::process::ExitCode;
use clap::Parser;
use forge_shim::{report, ForgeError};
use crate::cli::CLI;

fn main() -> ExitCode {
    let cli = CLI::parse();
    match execute::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<ForgeError>() {
                Some(err) => err.to_string(),
                None => format!("{e:#}"),
            };
            report::error(&message);
            ExitCode::FAILURE
        }
    }
}
