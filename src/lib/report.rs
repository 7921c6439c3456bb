use log::info;
use std::io::{self, Write};

use crate::driver::ServoDriver;
use crate::ids::{IdRange, ServoId};
use crate::telemetry::Telemetry;
use crate::workflow::SEPARATOR;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Scan the bus and print a telemetry block per servo. Returns how many
/// servos were reported.
pub fn report_servos(
    driver: &mut dyn ServoDriver,
    filter: Option<&IdRange>,
    fmt: OutputFormat,
    out: &mut dyn Write,
) -> io::Result<usize> {
    if fmt == OutputFormat::Plain {
        writeln!(out, "Scanning for servos...")?;
    } else {
        info!("Scanning for servos...");
    }

    let ids: Vec<ServoId> = driver
        .list_ids()
        .into_iter()
        .filter(|id| filter.map_or(true, |range| range.contains(*id)))
        .collect();

    let readings: Vec<(ServoId, Telemetry)> = ids
        .iter()
        .map(|&id| (id, Telemetry::read(&mut *driver, id)))
        .collect();

    match fmt {
        OutputFormat::Plain => write_plain(&readings, out)?,
        OutputFormat::Json => {
            let array: Vec<json::JsonValue> = readings
                .iter()
                .map(|(id, reading)| reading.to_json(*id))
                .collect();
            writeln!(out, "{}", json::stringify(array))?;
        }
    }

    Ok(readings.len())
}

fn write_plain(readings: &[(ServoId, Telemetry)], out: &mut dyn Write) -> io::Result<()> {
    if readings.is_empty() {
        return writeln!(out, "No servos found on the bus.");
    }

    writeln!(out, "\nFound {} servo(s):\n", readings.len())?;

    for (id, reading) in readings {
        writeln!(out, "Servo ID: {}", id)?;
        for line in reading.lines() {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Scan complete. Total servos found: {}", readings.len())
}
