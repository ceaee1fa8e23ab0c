use clap::Parser;
use pathnorm::{Cli, run};
use std::io;
use std::process::ExitCode;

/// Normalizes JSONPath expressions given as arguments, or one per line on stdin.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&cli, stdin.lock(), stdout.lock()) {
        Ok(report) if report.failed == 0 => ExitCode::SUCCESS,
        Ok(report) => {
            log::warn!("{} of {} expressions failed to normalize", report.failed, report.total);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
