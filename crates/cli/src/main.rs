//! jmh-compare CLI entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match jmh_compare_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
