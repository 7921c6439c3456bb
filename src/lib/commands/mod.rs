//! Entry points of the two tools. Each returns the process exit code; the
//! binaries only parse arguments and wire in stdin, stdout and the serial
//! connector.

pub mod change_id;
pub mod list;

use anyhow::{Context, Result};
use log::{error, log_enabled, Level};
use std::io::{self, Write};

use crate::config::Config;
use crate::driver::{Connector, ServoDriver};

/// Looks up an environment variable by name.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn connect(connector: &mut dyn Connector, config: &Config) -> Result<Box<dyn ServoDriver>> {
    connector
        .open(config)
        .with_context(|| format!("Could not open serial port '{}'", config.port))
}

fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            report_fatal(&e, &mut io::stderr());
            1
        }
    }
}

/// Fatal errors go through the logger, or straight to `err` when the logger
/// would drop them.
fn report_fatal(e: &anyhow::Error, err: &mut dyn Write) {
    if log_enabled!(Level::Error) {
        error!("{:#}", e);
    } else {
        let _ = writeln!(err, "Error: {:#}", e);
    }
}
