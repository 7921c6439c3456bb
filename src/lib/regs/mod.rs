//! ST3215 control table, limited to what the tools touch.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegSize {
    Byte = 1,
    Half = 2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reg {
    pub name: &'static str,
    pub address: u8,
    pub size: RegSize,
}

impl Reg {
    pub const fn new(name: &'static str, address: u8, size: RegSize) -> Self {
        Reg {
            name,
            address,
            size,
        }
    }

    pub fn count(&self) -> u8 {
        self.size as u8
    }
}

// EEPROM
pub const ID: Reg = Reg::new("ID", 5, RegSize::Byte);
pub const MODE: Reg = Reg::new("Mode", 33, RegSize::Byte);

// SRAM
pub const LOCK: Reg = Reg::new("Lock", 55, RegSize::Byte);
pub const PRESENT_POSITION: Reg = Reg::new("Present_Position", 56, RegSize::Half);
pub const PRESENT_LOAD: Reg = Reg::new("Present_Load", 60, RegSize::Half);
pub const PRESENT_VOLTAGE: Reg = Reg::new("Present_Voltage", 62, RegSize::Byte);
pub const PRESENT_TEMPERATURE: Reg = Reg::new("Present_Temperature", 63, RegSize::Byte);
