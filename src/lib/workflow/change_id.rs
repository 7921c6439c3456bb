use log::{info, warn};
use std::io::{self, Write};
use thiserror::Error;

use super::id_list;
use crate::driver::{DriverError, ServoDriver};
use crate::ids::ServoId;

#[derive(Error, Debug)]
pub enum ChangeIdError {
    #[error("no servo found with ID {id}")]
    NotFound { id: ServoId, present: Vec<ServoId> },
    #[error("ID {0} is already in use by another servo")]
    InUse(ServoId),
    #[error("failed to change ID: {0}")]
    WriteFailed(#[from] DriverError),
    #[error(transparent)]
    Output(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Changed {
    /// The servo answered a ping at its new ID after the write.
    pub verified: bool,
}

/// Re-address `current` to `new` after making sure `current` is there and
/// `new` is free. Nothing is written unless both hold.
pub fn change_servo_id(
    driver: &mut dyn ServoDriver,
    current: ServoId,
    new: ServoId,
    out: &mut dyn Write,
) -> Result<Changed, ChangeIdError> {
    if !driver.ping(current) {
        writeln!(out, "\nNo servo found with ID {}", current)?;
        writeln!(out, "   Scanning to see what's connected...")?;
        let present = driver.list_ids();
        if present.is_empty() {
            writeln!(out, "   No servos found on the bus.")?;
        } else {
            writeln!(out, "   Found servos with IDs: {}", id_list(&present))?;
        }
        return Err(ChangeIdError::NotFound {
            id: current,
            present,
        });
    }

    if current != new && driver.ping(new) {
        writeln!(out, "\nID {} is already in use by another servo!", new)?;
        writeln!(out, "   Please choose a different ID.")?;
        return Err(ChangeIdError::InUse(new));
    }

    writeln!(out, "\nChanging servo ID: {} -> {}", current, new)?;
    if let Err(e) = driver.change_id(current, new) {
        writeln!(out, "Failed to change ID: {}", e)?;
        return Err(e.into());
    }

    info!("servo {} re-addressed to {}", current, new);
    writeln!(out, "ID changed successfully!")?;
    writeln!(out, "\n   The servo now has ID {}", new)?;
    writeln!(out, "   This change is permanent (saved in EEPROM).")?;

    let verified = driver.ping(new);
    if verified {
        writeln!(out, "   Verified: servo responds at ID {}", new)?;
    } else {
        warn!("servo did not answer at ID {} after the change", new);
    }

    Ok(Changed { verified })
}
