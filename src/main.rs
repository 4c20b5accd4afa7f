use std::process::ExitCode;

use colored::Colorize;
use schema_ss::cli::CommandLineInterface;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let command_line_interface = CommandLineInterface::load();
    init_logging(command_line_interface.verbose());
    match command_line_interface.run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so generated code on stdout stays pipeable.
/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("schema_ss=warn"),
        1 => EnvFilter::new("schema_ss=info"),
        2 => EnvFilter::new("schema_ss=debug"),
        _ => EnvFilter::new("schema_ss=trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
