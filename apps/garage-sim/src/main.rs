//! # garage-sim Entry Point
//!
//! ```text
//! garage-sim [--config PATH] [--json] PLATE...
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use garage_sim::{parse_args, Command, USAGE};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        }
    };

    garage_sim::init_tracing();

    match garage_sim::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code(), "garage-sim failed: {}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
