use hauler_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unusable.
    if logging::init().is_err() {
        logging::init_stderr();
    }

    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("hauler error: {:#}", err);
        std::process::exit(1);
    }
}
