//! Modbus TCP Client
//!
//! Frame generation and response parsing are done by `rmodbus`; this module
//! supplies transaction ids, argument limits and the echo checks on write
//! responses.

use rmodbus::client::ModbusRequest;
use rmodbus::ModbusProto;

use crate::convert::{byte_len, unpack_bits};
use crate::error::{MbError, Result};
use crate::protocol::{COIL_OFF, COIL_ON};

/// Coils per read request
pub const MAX_READ_COILS: u16 = 2000;

/// Coils per write request
pub const MAX_WRITE_COILS: u16 = 1968;

/// Registers per write request
pub const MAX_WRITE_REGISTERS: u16 = 123;

/// Offset of the first data byte after MBAP header, unit id and function code
const DATA_OFFSET: usize = 8;

/// Length of a write response: header + unit + function + address + value
const WRITE_RESPONSE_SIZE: usize = DATA_OFFSET + 4;

/// Moves one request frame to the server and returns its response frame
pub trait Transport {
    fn transact(&mut self, adu: &[u8]) -> Result<Vec<u8>>;
}

/// Modbus client operations
///
/// Each call returns the response data: coil status bytes for reads, the
/// echoed value or quantity for writes.
pub trait Client {
    fn read_coils(&mut self, address: u16, quantity: u16) -> Result<Vec<u8>>;

    fn write_single_coil(&mut self, address: u16, value: u16) -> Result<Vec<u8>>;

    fn write_multiple_coils(
        &mut self,
        address: u16,
        quantity: u16,
        value: &[u8],
    ) -> Result<Vec<u8>>;

    fn write_multiple_registers(
        &mut self,
        address: u16,
        quantity: u16,
        value: &[u8],
    ) -> Result<Vec<u8>>;
}

/// Modbus TCP client over any transport
pub struct TcpClient<T: Transport> {
    transport: T,
    unit_id: u8,
    transaction_id: u16,
}

impl<T: Transport> TcpClient<T> {
    /// Create a client addressing `unit_id` through `transport`
    pub fn new(transport: T, unit_id: u8) -> Self {
        Self {
            transport,
            unit_id,
            transaction_id: 0,
        }
    }

    /// Transaction id of the most recent request
    pub fn transaction_id(&self) -> u16 {
        self.transaction_id
    }

    /// Give back the underlying transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn next_request(&mut self) -> ModbusRequest {
        self.transaction_id = self.transaction_id.wrapping_add(1);
        let mut request = ModbusRequest::new(self.unit_id, ModbusProto::TcpUdp);
        request.tr_id = self.transaction_id;
        request
    }

    /// Send a generated frame and let rmodbus check header and exception code
    fn send(&mut self, request: &ModbusRequest, adu: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!("tx {} {:02x?}", self.transaction_id, adu);
        let response = self.transport.transact(adu)?;
        tracing::debug!("rx {} {:02x?}", self.transaction_id, response);
        request.parse_ok(&response)?;
        Ok(response)
    }

    /// Check that a write response echoes address and value, return the value bytes
    fn write_echo(response: &[u8], address: u16, expected: u16) -> Result<Vec<u8>> {
        if response.len() != WRITE_RESPONSE_SIZE {
            return Err(MbError::Protocol(format!(
                "response data size '{}' does not match expected '4'",
                response.len().saturating_sub(DATA_OFFSET)
            )));
        }

        let echoed_address = u16::from_be_bytes([response[8], response[9]]);
        if echoed_address != address {
            return Err(MbError::Protocol(format!(
                "response address '{}' does not match request '{}'",
                echoed_address, address
            )));
        }

        let echoed_value = u16::from_be_bytes([response[10], response[11]]);
        if echoed_value != expected {
            return Err(MbError::Protocol(format!(
                "response value '{}' does not match request '{}'",
                echoed_value, expected
            )));
        }

        Ok(response[10..12].to_vec())
    }
}

fn check_quantity(kind: &str, quantity: u16, max: u16) -> Result<()> {
    if quantity == 0 || quantity > max {
        return Err(MbError::Protocol(format!(
            "{} quantity '{}' must be between '1' and '{}'",
            kind, quantity, max
        )));
    }
    Ok(())
}

impl<T: Transport> Client for TcpClient<T> {
    fn read_coils(&mut self, address: u16, quantity: u16) -> Result<Vec<u8>> {
        check_quantity("coil", quantity, MAX_READ_COILS)?;

        let mut request = self.next_request();
        let mut adu = Vec::new();
        request.generate_get_coils(address, quantity, &mut adu)?;
        let response = self.send(&request, &adu)?;

        let count = response[DATA_OFFSET] as usize;
        let data = &response[DATA_OFFSET + 1..];
        if data.len() != count {
            return Err(MbError::Protocol(format!(
                "response data size '{}' does not match count '{}'",
                data.len(),
                count
            )));
        }
        if count != byte_len(quantity as usize) {
            return Err(MbError::Protocol(format!(
                "response byte count '{}' does not cover '{}' coils",
                count, quantity
            )));
        }
        Ok(data.to_vec())
    }

    fn write_single_coil(&mut self, address: u16, value: u16) -> Result<Vec<u8>> {
        if value != COIL_ON && value != COIL_OFF {
            return Err(MbError::Protocol(format!(
                "state '{:#06x}' must be either 0xFF00 (ON) or 0x0000 (OFF)",
                value
            )));
        }

        let mut request = self.next_request();
        let mut adu = Vec::new();
        request.generate_set_coil(address, value == COIL_ON, &mut adu)?;
        let response = self.send(&request, &adu)?;
        Self::write_echo(&response, address, value)
    }

    fn write_multiple_coils(
        &mut self,
        address: u16,
        quantity: u16,
        value: &[u8],
    ) -> Result<Vec<u8>> {
        check_quantity("coil", quantity, MAX_WRITE_COILS)?;
        if value.len() != byte_len(quantity as usize) {
            return Err(MbError::Protocol(format!(
                "coil payload of {} bytes does not match quantity '{}'",
                value.len(),
                quantity
            )));
        }

        let states = unpack_bits(value, quantity as usize);
        let mut request = self.next_request();
        let mut adu = Vec::new();
        request.generate_set_coils_bulk(address, &states, &mut adu)?;
        let response = self.send(&request, &adu)?;
        Self::write_echo(&response, address, quantity)
    }

    fn write_multiple_registers(
        &mut self,
        address: u16,
        quantity: u16,
        value: &[u8],
    ) -> Result<Vec<u8>> {
        check_quantity("register", quantity, MAX_WRITE_REGISTERS)?;
        if value.len() != quantity as usize * 2 {
            return Err(MbError::Protocol(format!(
                "register payload of {} bytes does not match quantity '{}'",
                value.len(),
                quantity
            )));
        }

        let registers: Vec<u16> = value
            .chunks_exact(2)
            .map(|word| u16::from_be_bytes([word[0], word[1]]))
            .collect();
        let mut request = self.next_request();
        let mut adu = Vec::new();
        request.generate_set_holdings_bulk(address, &registers, &mut adu)?;
        let response = self.send(&request, &adu)?;
        Self::write_echo(&response, address, quantity)
    }
}
