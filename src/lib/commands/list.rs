use anyhow::Result;
use log::info;
use std::io::Write;

use super::{connect, exit_code, EnvLookup};
use crate::config::Config;
use crate::driver::Connector;
use crate::ids::IdRange;
use crate::report::{report_servos, OutputFormat};
use crate::workflow::SEPARATOR;

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub baudrate: u32,
    pub format: OutputFormat,
    pub ids: Option<IdRange>,
}

/// Report every servo on the bus. 0 once the bus was scanned, even if it
/// was empty; 1 when the scan could not happen at all.
pub fn run(
    lookup: EnvLookup,
    connector: &mut dyn Connector,
    options: &ListOptions,
    out: &mut dyn Write,
) -> i32 {
    exit_code(try_run(lookup, connector, options, out))
}

fn try_run(
    lookup: EnvLookup,
    connector: &mut dyn Connector,
    options: &ListOptions,
    out: &mut dyn Write,
) -> Result<i32> {
    let config = Config::resolve(lookup, options.baudrate)?;

    if options.format == OutputFormat::Plain {
        writeln!(out, "Connecting to serial port: {}", config.port)?;
        writeln!(out, "{}", SEPARATOR)?;
    } else {
        info!("Connecting to serial port: {}", config.port);
    }

    let mut driver = connect(connector, &config)?;
    report_servos(driver.as_mut(), options.ids.as_ref(), options.format, out)?;

    Ok(0)
}
