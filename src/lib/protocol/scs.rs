use super::{status_flags, Protocol, ProtocolError, Transport};
use anyhow::Result;
use log::{debug, warn};
use std::io::{Read, Write};

const OPCODE_PING: u8 = 1;
const OPCODE_READ: u8 = 2;
const OPCODE_WRITE: u8 = 3;

const BUFFER_SIZE: usize = 255;
/// Header, id, length, instruction/error and checksum.
const OVERHEAD: usize = 6;

/// Feetech SCS framing as spoken by the ST3215.
pub struct ScsProtocol<T: Transport> {
    port: T,
}

impl<T: Transport> ScsProtocol<T> {
    pub fn new(port: T) -> Self {
        Self { port }
    }

    #[cfg(test)]
    fn into_inner(self) -> T {
        self.port
    }

    fn transact(&mut self, id: u8, opcode: u8, params: &[u8], reply_len: usize) -> Result<Vec<u8>> {
        let mut buffer = [0u8; BUFFER_SIZE];
        let mut reply = [0u8; BUFFER_SIZE];

        if OVERHEAD + params.len() > BUFFER_SIZE || OVERHEAD + reply_len > BUFFER_SIZE {
            return Err(ProtocolError::InvalidCount.into());
        }

        let len_write = encode_instruction(&mut buffer, id, opcode, params);

        self.port.discard_input()?;
        debug!("send {:02X?}", &buffer[0..len_write]);
        self.port.write_all(&buffer[0..len_write])?;
        self.port.flush()?;

        let len_read = OVERHEAD + reply_len;
        self.port.read_exact(&mut buffer[0..len_read])?;
        debug!("recv {:02X?}", &buffer[0..len_read]);

        let status = decode_status(&buffer[0..len_read], &mut reply)?;
        if status.id != id {
            return Err(ProtocolError::WrongId {
                expected: id,
                got: status.id,
            }
            .into());
        }
        if status.error != 0 {
            warn!("servo {} reports {:?}", id, status_flags(status.error));
        }

        Ok(reply[..status.param_length].to_vec())
    }
}

impl<T: Transport> Protocol for ScsProtocol<T> {
    fn ping(&mut self, id: u8) -> Result<()> {
        debug!("ping {}", id);
        self.transact(id, OPCODE_PING, &[], 0).map(|_| ())
    }

    fn read(&mut self, id: u8, address: u8, count: u8) -> Result<Vec<u8>> {
        debug!("read {} {} {}", id, address, count);
        self.transact(id, OPCODE_READ, &[address, count], count.into())
    }

    fn write(&mut self, id: u8, address: u8, data: &[u8]) -> Result<()> {
        debug!("write {} {} {:02X?}", id, address, data);
        let mut params = Vec::with_capacity(data.len() + 1);
        params.push(address);
        params.extend_from_slice(data);

        self.transact(id, OPCODE_WRITE, &params, 0).map(|_| ())
    }
}

fn checksum(bytes: &[u8]) -> u8 {
    !bytes.iter().fold(0u8, |x, &y| x.wrapping_add(y))
}

fn encode_instruction(buffer: &mut [u8], id: u8, instruction: u8, params: &[u8]) -> usize {
    let length: u8 = (2 + params.len()) as u8;
    assert!(OVERHEAD + params.len() <= buffer.len());

    buffer[0] = 0xFF;
    buffer[1] = 0xFF;
    buffer[2] = id;
    buffer[3] = length;
    buffer[4] = instruction;

    buffer[5..(params.len() + 5)].clone_from_slice(params);

    buffer[5 + params.len()] = checksum(&buffer[2..5 + params.len()]);
    OVERHEAD + params.len()
}

#[derive(Debug, PartialEq)]
struct Status {
    id: u8,
    error: u8,
    param_length: usize,
}

fn decode_status(buffer: &[u8], params: &mut [u8]) -> Result<Status, ProtocolError> {
    if buffer.len() < OVERHEAD || buffer[3] < 2 || buffer[0..2] != [0xFF, 0xFF] {
        return Err(ProtocolError::BadPacket);
    }

    let param_length: usize = (buffer[3] - 2).into();
    if buffer.len() < OVERHEAD + param_length || params.len() < param_length {
        return Err(ProtocolError::BadPacket);
    }

    if checksum(&buffer[2..5 + param_length]) != buffer[5 + param_length] {
        return Err(ProtocolError::BadPacket);
    }

    params[..param_length].copy_from_slice(&buffer[5..5 + param_length]);

    Ok(Status {
        id: buffer[2],
        error: buffer[4],
        param_length,
    })
}
