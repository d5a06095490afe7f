//! CodeFlow CLI
//!
//! Runs CodeFlow programs from files or the bundled demos, prompting on
//! the console whenever a program reads a variable.

use codeflow_core::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
