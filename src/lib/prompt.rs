use std::io::{self, BufRead, Write};

use crate::ids::{IdError, ServoId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prompted {
    Cancelled,
    /// The user picked the id the servo already has.
    Unchanged,
    New(ServoId),
}

/// Read one trimmed line, `None` at end of input.
fn read_answer(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a new id until a valid one is given or the user quits with `q`.
pub fn ask_new_id(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    current: ServoId,
) -> io::Result<Prompted> {
    loop {
        let answer = match read_answer(input, out, "\nEnter new ID (or 'q' to quit): ")? {
            Some(answer) => answer,
            None => {
                writeln!(out, "Cancelled.")?;
                return Ok(Prompted::Cancelled);
            }
        };

        if answer.eq_ignore_ascii_case("q") {
            writeln!(out, "Cancelled.")?;
            return Ok(Prompted::Cancelled);
        }

        match answer.parse::<ServoId>() {
            Ok(id) if id == current => {
                writeln!(out, "Servo already has ID {}", current)?;
                return Ok(Prompted::Unchanged);
            }
            Ok(id) => return Ok(Prompted::New(id)),
            Err(IdError::NotANumber(_)) => writeln!(out, "Please enter a valid number")?,
            Err(_) => writeln!(out, "ID must be between 1 and 253")?,
        }
    }
}

/// Only an explicit `y` counts as yes.
pub fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> io::Result<bool> {
    Ok(read_answer(input, out, question)?
        .map(|answer| answer.eq_ignore_ascii_case("y"))
        .unwrap_or(false))
}
