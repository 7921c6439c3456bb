use anyhow::Result;
use std::io::{BufRead, Write};

use super::{connect, exit_code, EnvLookup};
use crate::config::Config;
use crate::driver::Connector;
use crate::ids::{IdError, ServoId};
use crate::prompt::{ask_new_id, confirm, Prompted};
use crate::telemetry::Telemetry;
use crate::workflow::{change_servo_id, locate_single, ChangeIdError, Located, SEPARATOR};

const BANNER: &str = "==================================================";

pub const USAGE: &str = "
Usage: st3215-change-id [current_id] [new_id]

Examples:
  st3215-change-id           # Interactive mode
  st3215-change-id 1 5       # Change ID 1 to ID 5

IMPORTANT:
  - Connect only ONE servo at a time when changing IDs
  - Valid IDs are 1-253 (254 is broadcast address)
  - The ID change is permanent (saved in servo EEPROM)

Workflow for multiple servos with same ID:
  1. Disconnect all servos
  2. Connect just one servo
  3. Run this tool to change its ID
  4. Disconnect it, connect the next one
  5. Repeat until all servos have unique IDs
";

/// No ids: interactive mode. Two ids: change directly. Anything else
/// prints usage.
pub fn run(
    args: &[String],
    lookup: EnvLookup,
    baudrate: u32,
    connector: &mut dyn Connector,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> i32 {
    let result = match args {
        [] => interactive(lookup, baudrate, connector, input, out),
        [current, new] => direct(current, new, lookup, baudrate, connector, out),
        _ => usage(out),
    };
    exit_code(result)
}

fn usage(out: &mut dyn Write) -> Result<i32> {
    writeln!(out, "{}", USAGE)?;
    Ok(1)
}

fn parse_arg(which: &str, arg: &str, out: &mut dyn Write) -> Result<Option<ServoId>> {
    match arg.parse::<ServoId>() {
        Ok(id) => Ok(Some(id)),
        Err(IdError::NotANumber(_)) => {
            writeln!(out, "Error: IDs must be integers")?;
            Ok(None)
        }
        Err(e) => {
            writeln!(out, "Error: {} ID must be between 1 and 253 ({})", which, e)?;
            Ok(None)
        }
    }
}

fn direct(
    current: &str,
    new: &str,
    lookup: EnvLookup,
    baudrate: u32,
    connector: &mut dyn Connector,
    out: &mut dyn Write,
) -> Result<i32> {
    let current = parse_arg("Current", current, out)?;
    let new = parse_arg("New", new, out)?;
    let (current, new) = match (current, new) {
        (Some(current), Some(new)) => (current, new),
        _ => return usage(out),
    };

    let config = Config::resolve(lookup, baudrate)?;
    writeln!(out, "Connecting to: {}", config.port)?;
    writeln!(out, "{}", SEPARATOR)?;

    let mut driver = connect(connector, &config)?;

    // No shortcut for current == new here: the checks and the write still run.
    workflow_exit_code(change_servo_id(driver.as_mut(), current, new, out))
}

fn interactive(
    lookup: EnvLookup,
    baudrate: u32,
    connector: &mut dyn Connector,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<i32> {
    let config = Config::resolve(lookup, baudrate)?;

    writeln!(out, "{}", BANNER)?;
    writeln!(out, "  ST3215 Servo ID Changer - Interactive Mode")?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "\nSerial port: {}", config.port)?;
    writeln!(out, "\nIMPORTANT: Connect only ONE servo at a time!")?;
    writeln!(out, "{}", SEPARATOR)?;

    let mut driver = connect(connector, &config)?;

    let current = match locate_single(driver.as_mut(), out)? {
        Located::Single(id) => id,
        Located::None | Located::Ambiguous(_) => return Ok(0),
    };

    writeln!(out, "\nFound servo with ID: {}", current)?;
    let reading = Telemetry {
        position: driver.read_position(current),
        voltage: driver.read_voltage(current),
        ..Default::default()
    };
    for line in reading.lines() {
        writeln!(out, " {}", line)?;
    }

    writeln!(out, "\nCurrent ID: {}", current)?;
    writeln!(out, "Valid IDs: 1-253 (254 is broadcast)")?;

    let new = match ask_new_id(input, out, current)? {
        Prompted::New(id) => id,
        Prompted::Cancelled | Prompted::Unchanged => return Ok(0),
    };

    writeln!(out, "\nAbout to change ID: {} -> {}", current, new)?;
    if !confirm(input, out, "Proceed? (y/n): ")? {
        writeln!(out, "Cancelled.")?;
        return Ok(0);
    }

    workflow_exit_code(change_servo_id(driver.as_mut(), current, new, out))
}

/// Failures were already explained on `out`; only I/O on `out` itself is fatal.
fn workflow_exit_code<T>(result: Result<T, ChangeIdError>) -> Result<i32> {
    match result {
        Ok(_) => Ok(0),
        Err(ChangeIdError::Output(e)) => Err(e.into()),
        Err(_) => Ok(1),
    }
}
