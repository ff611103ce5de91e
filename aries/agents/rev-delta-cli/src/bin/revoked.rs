use std::process::ExitCode;

use clap::Parser;
use rev_delta_cli::reconcile_cmd::{run, ReconcileOpts};

fn main() -> ExitCode {
    rev_delta_cli::setup_logging("warn");
    let opts = ReconcileOpts::parse();

    match run(&opts) {
        Ok(indices) => {
            for index in indices {
                println!("{index}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
