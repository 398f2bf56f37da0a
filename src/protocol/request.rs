//! Request definitions
//!
//! A request holds operands already converted to their wire encoding.

use super::Operation;
use crate::convert::{coil_payload, encode_registers, parse_bytes};
use crate::error::{MbError, Result};

/// Coil state value for ON in a single-coil write
pub const COIL_ON: u16 = 0xFF00;

/// Coil state value for OFF in a single-coil write
pub const COIL_OFF: u16 = 0x0000;

/// Width of a holding register in bits
const REGISTER_BITS: u32 = 16;

/// A fully converted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Read `quantity` coils starting at `address`
    ReadCoils { address: u16, quantity: u16 },

    /// Set one coil to `value` (`COIL_ON` or `COIL_OFF`)
    WriteSingleCoil { address: u16, value: u16 },

    /// Set `quantity` coils from a little-bit-first bitmap
    WriteMultipleCoils {
        address: u16,
        quantity: u16,
        payload: Vec<u8>,
    },

    /// Register write issued by `writeSingleRegister`, sent as a
    /// multiple-register write like `WriteMultipleRegisters`
    WriteSingleRegister {
        address: u16,
        quantity: u16,
        payload: Vec<u8>,
    },

    /// Write `quantity` holding registers from big-endian words
    WriteMultipleRegisters {
        address: u16,
        quantity: u16,
        payload: Vec<u8>,
    },
}

impl Request {
    /// Build a request from the raw command-line operands
    ///
    /// `size` is only consulted by `readCoils`; the write operations take
    /// their quantity from the number of values.
    pub fn build<S: AsRef<str>>(
        operation: Operation,
        address: Option<u16>,
        size: Option<u16>,
        values: &[S],
    ) -> Result<Self> {
        let address = address.ok_or(MbError::MissingArgument("-address"))?;

        let request = match operation {
            Operation::ReadCoils => {
                let quantity = size.ok_or(MbError::MissingArgument("-size"))?;
                Request::ReadCoils { address, quantity }
            }
            Operation::WriteSingleCoil => {
                let bytes = parse_bytes(values)?;
                let first = *bytes.first().ok_or(MbError::MissingArgument("value"))?;
                let value = if first >= 1 { COIL_ON } else { COIL_OFF };
                Request::WriteSingleCoil { address, value }
            }
            Operation::WriteMultipleCoils => {
                if values.is_empty() {
                    return Err(MbError::MissingArgument("values"));
                }
                let payload = coil_payload(values)?;
                Request::WriteMultipleCoils {
                    address,
                    quantity: values.len() as u16,
                    payload,
                }
            }
            Operation::WriteSingleRegister => {
                let (quantity, payload) = register_payload(values)?;
                Request::WriteSingleRegister {
                    address,
                    quantity,
                    payload,
                }
            }
            Operation::WriteMultipleRegisters => {
                let (quantity, payload) = register_payload(values)?;
                Request::WriteMultipleRegisters {
                    address,
                    quantity,
                    payload,
                }
            }
        };
        Ok(request)
    }

    /// Get the operation this request performs
    pub fn operation(&self) -> Operation {
        match self {
            Request::ReadCoils { .. } => Operation::ReadCoils,
            Request::WriteSingleCoil { .. } => Operation::WriteSingleCoil,
            Request::WriteMultipleCoils { .. } => Operation::WriteMultipleCoils,
            Request::WriteSingleRegister { .. } => Operation::WriteSingleRegister,
            Request::WriteMultipleRegisters { .. } => Operation::WriteMultipleRegisters,
        }
    }

    /// Starting address of the request
    pub fn address(&self) -> u16 {
        match self {
            Request::ReadCoils { address, .. }
            | Request::WriteSingleCoil { address, .. }
            | Request::WriteMultipleCoils { address, .. }
            | Request::WriteSingleRegister { address, .. }
            | Request::WriteMultipleRegisters { address, .. } => *address,
        }
    }
}

/// Encode register values, returning the register count and the word bytes
fn register_payload<S: AsRef<str>>(values: &[S]) -> Result<(u16, Vec<u8>)> {
    if values.is_empty() {
        return Err(MbError::MissingArgument("values"));
    }
    let payload = encode_registers(values, REGISTER_BITS)?;
    let quantity = u16::try_from(payload.len() / 2)
        .map_err(|_| MbError::Protocol(format!("too many register values: {}", values.len())))?;
    Ok((quantity, payload))
}
