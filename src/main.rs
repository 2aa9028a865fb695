//! release-delta - Compute changed chart releases between deployment manifests

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = release_delta::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
