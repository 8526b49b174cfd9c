//! Binary entrypoint for the `userload` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A `.env` file can supply the USERLOAD_* settings.
    let _ = dotenvy::dotenv();

    match userload::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
