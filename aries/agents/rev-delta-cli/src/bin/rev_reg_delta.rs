use std::process::ExitCode;

use clap::Parser;
use log::info;
use rev_delta_cli::fetch_cmd::{run, FetchOpts};

#[tokio::main]
async fn main() -> ExitCode {
    rev_delta_cli::load_dot_env();
    rev_delta_cli::setup_logging("info");
    let opts = FetchOpts::parse();
    info!("Using genesis transactions from {}", opts.genesis_url);

    let output = match run(opts).await {
        Ok(output) => output,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    match serde_json::to_string_pretty(&output) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to render output: {err}");
            ExitCode::FAILURE
        }
    }
}
