use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use adlens_lib::interfaces::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    adlens_lib::init_tracing();

    match cli::run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "adlens failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
