//! Command-line interface
//!
//! Flag definitions, Go-style flag normalization and result rendering.
//! Both `-host 10.0.0.5` and `--host 10.0.0.5` are accepted.

use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::config::{Config, DEFAULT_PORT, DEFAULT_TIMEOUT_MS};
use crate::error::{MbError, Result};
use crate::protocol::{Operation, Request, Response};

/// Long flags that may be written with a single dash
const LONG_FLAGS: [&str; 8] = [
    "host",
    "port",
    "operation",
    "address",
    "size",
    "unit",
    "timeout",
    "help",
];

/// mbtool
#[derive(Parser, Debug)]
#[command(name = "mbtool")]
#[command(about = "Issue a single Modbus TCP request")]
#[command(version)]
pub struct Args {
    /// Defines the host to be addressed
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Can be used to override the port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Defines which operation should be performed
    #[arg(long)]
    pub operation: Option<String>,

    /// Address to be used
    #[arg(long)]
    pub address: Option<u16>,

    /// Size for reading how many coils
    #[arg(long)]
    pub size: Option<u16>,

    /// Unit identifier of the target device
    #[arg(long, default_value_t = 0)]
    pub unit: u8,

    /// Connect/read/write timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Values to write
    pub values: Vec<String>,
}

impl Args {
    /// Connection settings taken from the flags
    pub fn config(&self) -> Config {
        let mut builder = Config::builder()
            .port(self.port)
            .unit_id(self.unit)
            .timeout_ms(self.timeout);
        if !self.host.is_empty() {
            builder = builder.host(&self.host);
        }
        builder.build()
    }

    /// The requested operation with its operands converted
    pub fn request(&self) -> Result<Request> {
        let operation: Operation = self
            .operation
            .as_deref()
            .ok_or(MbError::MissingArgument("-operation"))?
            .parse()?;
        Request::build(operation, self.address, self.size, &self.values)
    }

    /// Default log filter for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Rewrite `-flag` / `-flag=value` into `--flag` / `--flag=value`
///
/// Only the known long flags are rewritten, so `-v` and `-vv` keep their
/// meaning. Everything after `--` is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some(s) if is_single_dash_long(s) => normalized.push(format!("-{}", s).into()),
            _ => normalized.push(arg),
        }
    }

    normalized
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or(rest);
    LONG_FLAGS.contains(&name)
}

/// Render the outcome of an invocation for stdout
///
/// A failed request still prints an empty `response []` line ahead of the
/// error.
pub fn report(result: &Result<Response>) -> String {
    match result {
        Ok(response) => response.to_string(),
        Err(e) => format!("response []\nerr {}", e),
    }
}
