#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use st3215_utils::config::Config;
use st3215_utils::driver::{Connector, DriverError, ServoDriver};
use st3215_utils::ids::ServoId;
use st3215_utils::port::OpenPortError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListIds,
    Ping(u8),
    ChangeId(u8, u8),
    Read(&'static str, u8),
}

/// Servos on a pretend bus plus a log of every driver call.
#[derive(Debug, Default)]
pub struct Bus {
    pub present: Vec<u8>,
    pub reject_writes: bool,
    /// Servo keeps answering at its old id after a successful write.
    pub stale_after_write: bool,
    pub unreadable: Vec<&'static str>,
    pub calls: Vec<Call>,
}

impl Bus {
    pub fn with(present: &[u8]) -> Rc<RefCell<Bus>> {
        Rc::new(RefCell::new(Bus {
            present: present.to_vec(),
            ..Default::default()
        }))
    }

    pub fn change_calls(&self) -> Vec<(u8, u8)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::ChangeId(from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    fn read<T>(&mut self, field: &'static str, id: ServoId, value: T) -> Option<T> {
        self.calls.push(Call::Read(field, id.value()));
        (self.present.contains(&id.value()) && !self.unreadable.contains(&field)).then(|| value)
    }
}

pub struct StubDriver(pub Rc<RefCell<Bus>>);

impl ServoDriver for StubDriver {
    fn list_ids(&mut self) -> Vec<ServoId> {
        let mut bus = self.0.borrow_mut();
        bus.calls.push(Call::ListIds);
        bus.present
            .iter()
            .map(|&id| ServoId::new(id).unwrap())
            .collect()
    }

    fn ping(&mut self, id: ServoId) -> bool {
        let mut bus = self.0.borrow_mut();
        bus.calls.push(Call::Ping(id.value()));
        bus.present.contains(&id.value())
    }

    fn change_id(&mut self, from: ServoId, to: ServoId) -> Result<(), DriverError> {
        let mut bus = self.0.borrow_mut();
        bus.calls.push(Call::ChangeId(from.value(), to.value()));
        if bus.reject_writes {
            return Err(DriverError::WriteId {
                id: from,
                detail: "corrupted status packet".into(),
            });
        }
        if !bus.stale_after_write {
            for id in bus.present.iter_mut() {
                if *id == from.value() {
                    *id = to.value();
                }
            }
        }
        Ok(())
    }

    fn read_position(&mut self, id: ServoId) -> Option<u16> {
        self.0.borrow_mut().read("position", id, 2048)
    }

    fn read_voltage(&mut self, id: ServoId) -> Option<f64> {
        self.0.borrow_mut().read("voltage", id, 12.1)
    }

    fn read_temperature(&mut self, id: ServoId) -> Option<u8> {
        self.0.borrow_mut().read("temperature", id, 31)
    }

    fn read_mode(&mut self, id: ServoId) -> Option<u8> {
        self.0.borrow_mut().read("mode", id, 0)
    }

    fn read_load(&mut self, id: ServoId) -> Option<f64> {
        self.0.borrow_mut().read("load", id, 2.5)
    }
}

pub struct StubConnector {
    pub bus: Rc<RefCell<Bus>>,
    pub opened: usize,
    pub fail: bool,
}

impl StubConnector {
    pub fn new(bus: &Rc<RefCell<Bus>>) -> Self {
        StubConnector {
            bus: Rc::clone(bus),
            opened: 0,
            fail: false,
        }
    }
}

impl Connector for StubConnector {
    fn open(&mut self, config: &Config) -> Result<Box<dyn ServoDriver>, OpenPortError> {
        self.opened += 1;
        if self.fail {
            return Err(OpenPortError::PortBusy {
                port_name: config.port.clone(),
            });
        }
        Ok(Box::new(StubDriver(Rc::clone(&self.bus))))
    }
}

pub fn id(value: u8) -> ServoId {
    ServoId::new(value).unwrap()
}

pub fn port_set(name: &str) -> Option<String> {
    (name == "ST3215_DEV").then(|| "/dev/ttyUSB0".to_string())
}

pub fn port_unset(_name: &str) -> Option<String> {
    None
}
