use clap::Parser;
use datesort::cli::{Args, RunOptions, run_cli};
use datesort::logging;
use datesort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = match logging::init(&args.logs_dir) {
        Ok(path) => Some(path),
        Err(e) => {
            OutputFormatter::warning(&format!("Could not set up log file: {}", e));
            None
        }
    };

    let options = RunOptions::from_args(&args, log_file);
    match run_cli(args.command(), &args.source_folder, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
