use log::{debug, warn};

use super::{Connector, DriverError, ServoDriver};
use crate::config::Config;
use crate::ids::ServoId;
use crate::port::{self, OpenPortError};
use crate::protocol::{Protocol, ProtocolError, ScsProtocol};
use crate::regs::{self, Reg};

const POSITION_MASK: u16 = 0x0FFF;
const LOAD_MAGNITUDE_MASK: u16 = 0x03FF;
const LOAD_DIRECTION_BIT: u16 = 0x0400;

pub struct St3215<P: Protocol> {
    proto: P,
}

impl<P: Protocol> St3215<P> {
    pub fn new(proto: P) -> Self {
        Self { proto }
    }

    fn read_reg(&mut self, id: ServoId, reg: Reg) -> Option<Vec<u8>> {
        match self.proto.read(id.value(), reg.address, reg.count()) {
            Ok(bytes) if bytes.len() == usize::from(reg.count()) => Some(bytes),
            Ok(bytes) => {
                debug!("short read of {} from id {}: {:02X?}", reg.name, id, bytes);
                None
            }
            Err(e) => {
                debug!("read of {} from id {} failed: {:#}", reg.name, id, e);
                None
            }
        }
    }

    fn read_byte(&mut self, id: ServoId, reg: Reg) -> Option<u8> {
        self.read_reg(id, reg).map(|bytes| bytes[0])
    }

    fn read_half(&mut self, id: ServoId, reg: Reg) -> Option<u16> {
        self.read_reg(id, reg).map(|bytes| u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn write_lock(&mut self, id: ServoId, locked: bool) -> anyhow::Result<()> {
        self.proto.write(id.value(), regs::LOCK.address, &[u8::from(locked)])
    }
}

impl<P: Protocol> ServoDriver for St3215<P> {
    fn list_ids(&mut self) -> Vec<ServoId> {
        ServoId::all().filter(|&id| self.ping(id)).collect()
    }

    fn ping(&mut self, id: ServoId) -> bool {
        match self.proto.ping(id.value()) {
            Ok(()) => true,
            Err(e) => {
                debug!("no answer from id {}: {:#}", id, e);
                false
            }
        }
    }

    fn change_id(&mut self, from: ServoId, to: ServoId) -> Result<(), DriverError> {
        self.write_lock(from, false).map_err(|e| DriverError::Unlock {
            id: from,
            detail: format!("{:#}", e),
        })?;

        match self.proto.write(from.value(), regs::ID.address, &[to.value()]) {
            Ok(()) => {}
            // Some firmware answers the ID write from the address it just took.
            Err(e)
                if matches!(
                    e.downcast_ref::<ProtocolError>(),
                    Some(ProtocolError::WrongId { got, .. }) if *got == to.value()
                ) =>
            {
                debug!("servo {} answered the ID write as {}", from, to);
            }
            Err(e) => {
                // The id is unchanged, so the EEPROM must not stay writable.
                if let Err(lock_err) = self.write_lock(from, true) {
                    warn!("EEPROM of servo {} left unlocked: {:#}", from, lock_err);
                }
                return Err(DriverError::WriteId {
                    id: from,
                    detail: format!("{:#}", e),
                })
            }
        }

        if let Err(e) = self.write_lock(to, true) {
            warn!("ID changed but EEPROM of servo {} not re-locked: {:#}", to, e);
        }

        Ok(())
    }

    fn read_position(&mut self, id: ServoId) -> Option<u16> {
        self.read_half(id, regs::PRESENT_POSITION)
            .map(|raw| raw & POSITION_MASK)
    }

    fn read_voltage(&mut self, id: ServoId) -> Option<f64> {
        self.read_byte(id, regs::PRESENT_VOLTAGE).map(|raw| f64::from(raw) / 10.0)
    }

    fn read_temperature(&mut self, id: ServoId) -> Option<u8> {
        self.read_byte(id, regs::PRESENT_TEMPERATURE)
    }

    fn read_mode(&mut self, id: ServoId) -> Option<u8> {
        self.read_byte(id, regs::MODE)
    }

    fn read_load(&mut self, id: ServoId) -> Option<f64> {
        self.read_half(id, regs::PRESENT_LOAD).map(|raw| {
            let percent = f64::from(raw & LOAD_MAGNITUDE_MASK) / 10.0;
            if raw & LOAD_DIRECTION_BIT != 0 {
                -percent
            } else {
                percent
            }
        })
    }
}

/// Opens the configured serial port and speaks SCS over it.
pub struct SerialConnector {
    pub force: bool,
}

impl Connector for SerialConnector {
    fn open(&mut self, config: &Config) -> Result<Box<dyn ServoDriver>, OpenPortError> {
        let port = port::open_port(&config.port, config.baudrate, self.force)?;
        Ok(Box::new(St3215::new(ScsProtocol::new(port))))
    }
}
