#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
use linux::is_port_open;

pub use serialport::SerialPort;

use core::time::Duration;
use log::debug;
use serialport::ClearBuffer;
use std::io;
use thiserror::Error;

use crate::protocol::Transport;

/// Per-read timeout. A servo that does not answer within it is absent.
const READ_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Error, Debug)]
pub enum OpenPortError {
    #[error("{port_name:?} busy, another program has it open")]
    PortBusy { port_name: String },
    #[error("could not open serial port {port_name:?}: {source}")]
    Open {
        port_name: String,
        #[source]
        source: serialport::Error,
    },
}

pub fn open_port(
    port_name: &str,
    baudrate: u32,
    force: bool,
) -> Result<Box<dyn SerialPort>, OpenPortError> {
    if !force && is_port_open(port_name) {
        return Err(OpenPortError::PortBusy {
            port_name: port_name.to_string(),
        });
    }

    let open_error = |source| OpenPortError::Open {
        port_name: port_name.to_string(),
        source,
    };

    let port = serialport::new(port_name, baudrate)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(open_error)?;

    debug!("open_port OK: {} @ {} baud", port_name, baudrate);
    Ok(port)
}

#[cfg(not(target_os = "linux"))]
fn is_port_open(_port_name: &str) -> bool {
    false
}

impl Transport for Box<dyn SerialPort> {
    fn discard_input(&mut self) -> io::Result<()> {
        self.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}
