//! gyp-to-pri - GYP to qmake converter

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = gyp_to_pri::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
