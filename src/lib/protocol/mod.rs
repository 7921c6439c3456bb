mod scs;

use anyhow::Result;
use std::io::{self, Read, Write};
use thiserror::Error;

pub use scs::ScsProtocol;

#[derive(Error, Debug, PartialEq)]
pub enum ProtocolError {
    #[error("corrupted status packet")]
    BadPacket,
    #[error("status packet from id {got}, expected {expected}")]
    WrongId { expected: u8, got: u8 },
    #[error("invalid byte count for chosen protocol")]
    InvalidCount,
}

/// Byte stream to the bus. Serial ports get `discard_input` from the driver,
/// in-memory streams can keep the default.
pub trait Transport: Read + Write {
    fn discard_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Register level access to servos. One attempt per call; callers decide
/// what a failure means.
pub trait Protocol {
    fn ping(&mut self, id: u8) -> Result<()>;
    fn read(&mut self, id: u8, address: u8, count: u8) -> Result<Vec<u8>>;
    fn write(&mut self, id: u8, address: u8, data: &[u8]) -> Result<()>;
}

/// Names of the servo status flags set in a status packet error byte.
pub fn status_flags(error: u8) -> Vec<&'static str> {
    const FLAGS: [(u8, &str); 5] = [
        (1, "voltage"),
        (2, "angle"),
        (4, "overheat"),
        (8, "overcurrent"),
        (32, "overload"),
    ];

    FLAGS
        .iter()
        .filter(|(bit, _)| error & bit != 0)
        .map(|(_, name)| *name)
        .collect()
}
