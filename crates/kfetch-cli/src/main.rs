use kfetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log to the XDG state file; stderr if that cannot be set up.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("kfetch error: {:#}", err);
        std::process::exit(1);
    }
}
