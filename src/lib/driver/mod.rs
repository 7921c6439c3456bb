//! The servo driver seam: everything the tools need from the bus, and
//! nothing more. `St3215` is the serial implementation; tests plug in
//! their own.

mod st3215;

use thiserror::Error;

use crate::config::Config;
use crate::ids::ServoId;
use crate::port::OpenPortError;

pub use st3215::{SerialConnector, St3215};

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("could not unlock EEPROM of servo {id}: {detail}")]
    Unlock { id: ServoId, detail: String },
    #[error("writing ID register of servo {id} failed: {detail}")]
    WriteId { id: ServoId, detail: String },
}

pub trait ServoDriver {
    /// Ids answering a ping, in scan order.
    fn list_ids(&mut self) -> Vec<ServoId>;
    fn ping(&mut self, id: ServoId) -> bool;
    /// Persistently re-address `from` to `to`.
    fn change_id(&mut self, from: ServoId, to: ServoId) -> Result<(), DriverError>;

    /// Raw position, 0-4095 steps per turn.
    fn read_position(&mut self, id: ServoId) -> Option<u16>;
    /// Supply voltage in volts.
    fn read_voltage(&mut self, id: ServoId) -> Option<f64>;
    /// Temperature in °C.
    fn read_temperature(&mut self, id: ServoId) -> Option<u8>;
    fn read_mode(&mut self, id: ServoId) -> Option<u8>;
    /// Load in percent of maximum torque, negative when driving backwards.
    fn read_load(&mut self, id: ServoId) -> Option<f64>;
}

/// Opens the single bus connection of a run.
pub trait Connector {
    fn open(&mut self, config: &Config) -> Result<Box<dyn ServoDriver>, OpenPortError>;
}
