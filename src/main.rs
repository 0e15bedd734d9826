//! Banknote Report - command-line entry point

use banknote_report::data::LoaderError;
use banknote_report::{BanknoteApp, ReportConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = ReportConfig::default();

    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    match BanknoteApp::new(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::from(1)
        }
    }
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<LoaderError>() {
        Some(not_found @ LoaderError::NotFound { .. }) => {
            println!("Error: {not_found}");
            println!("Please ensure the file is in the current working directory.");
        }
        _ => println!("Error: {err:#}"),
    }
}
