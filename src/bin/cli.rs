//! mbtool CLI
//!
//! Issues one Modbus TCP request and prints the outcome.

use clap::error::ErrorKind;
use clap::Parser;
use mbtool::cli::{normalize_args, report, Args};
use mbtool::dispatch;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let args = match Args::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(args) => args,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    let _ = e.print();
                }
                _ => println!("response []\nerr {}", e),
            }
            return;
        }
    };

    // Logs go to stderr, stdout carries the result
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mbtool v{}", mbtool::VERSION);

    let config = args.config();
    let result = args
        .request()
        .and_then(|request| dispatch::run(&config, &request));

    if let Err(e) = &result {
        tracing::debug!("Request failed: {:?}", e);
    }

    println!("{}", report(&result));
}
