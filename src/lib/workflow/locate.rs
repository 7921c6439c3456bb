use log::debug;
use std::io::{self, Write};

use super::id_list;
use crate::driver::ServoDriver;
use crate::ids::ServoId;

#[derive(Debug, Clone, PartialEq)]
pub enum Located {
    None,
    /// More than one servo answered; an ID write cannot be aimed safely.
    Ambiguous(Vec<ServoId>),
    Single(ServoId),
}

pub fn locate_single(driver: &mut dyn ServoDriver, out: &mut dyn Write) -> io::Result<Located> {
    writeln!(out, "Scanning for servos...")?;
    let ids = driver.list_ids();
    debug!("scan found {:?}", ids);

    match ids.as_slice() {
        [] => {
            writeln!(out, "\nNo servos found!")?;
            writeln!(out, "   Make sure the servo is powered and connected.")?;
            Ok(Located::None)
        }
        [id] => Ok(Located::Single(*id)),
        _ => {
            writeln!(out, "\nFound {} servos: {}", ids.len(), id_list(&ids))?;
            writeln!(out, "   Please connect only ONE servo at a time to change its ID.")?;
            writeln!(out, "   Disconnect all but one servo and try again.")?;
            Ok(Located::Ambiguous(ids))
        }
    }
}
