//! Argument Conversion
//!
//! Turns the string operands given on the command line into the byte
//! layouts Modbus requests carry.
//!
//! ## Coil payload layout
//! ```text
//! tokens:  "1" "0" "1" "1" "0" "0" "0" "0" "1"
//! packed:  0b1_0000_1101 (u64, token i -> bit i)
//! bytes:   [0x0D, 0x01]  (little-endian, truncated to ceil(n/8))
//! ```

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, BytesMut};

use crate::error::{MbError, Result};

/// Width of the integer that coil flags are packed into
pub const MAX_PACKED_BITS: usize = u64::BITS as usize;

/// Parse an unsigned decimal token; a sign prefix is not a digit
fn parse_unsigned<T: FromStr>(value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    if value.starts_with('+') {
        return Err(MbError::invalid(value, "invalid digit found in string"));
    }
    value.parse::<T>().map_err(|e| MbError::invalid(value, e))
}

/// Parse each token as an unsigned 8-bit integer
pub fn parse_bytes<S: AsRef<str>>(values: &[S]) -> Result<Vec<u8>> {
    values
        .iter()
        .map(|value| parse_unsigned::<u8>(value.as_ref()))
        .collect()
}

/// Pack 0/1 tokens into an integer, token `i` landing in bit `i`
pub fn pack_bits<S: AsRef<str>>(values: &[S]) -> Result<u64> {
    if values.len() > MAX_PACKED_BITS {
        return Err(MbError::Protocol(format!(
            "too many coil values: {} (max {})",
            values.len(),
            MAX_PACKED_BITS
        )));
    }

    let mut packed = 0u64;
    for (i, value) in values.iter().enumerate() {
        let value = value.as_ref();
        let bit = match value.parse::<u8>() {
            Ok(bit @ (0 | 1)) => u64::from(bit),
            Ok(_) => return Err(MbError::invalid(value, "coil value must be 0 or 1")),
            Err(e) => return Err(MbError::invalid(value, e)),
        };
        packed |= bit << i;
    }
    Ok(packed)
}

/// Parse each token as an unsigned integer of at most `bit_size` bits and
/// serialize it as a big-endian 16-bit word
pub fn encode_registers<S: AsRef<str>>(values: &[S], bit_size: u32) -> Result<Vec<u8>> {
    if !(1..=16).contains(&bit_size) {
        return Err(MbError::Config(format!(
            "unsupported register width: {} bits",
            bit_size
        )));
    }
    let max = (1u32 << bit_size) - 1;

    let mut buf = BytesMut::with_capacity(values.len() * 2);
    for value in values {
        let value = value.as_ref();
        let parsed: u32 = parse_unsigned(value)?;
        if parsed > max {
            return Err(MbError::invalid(
                value,
                format!("out of range for {}-bit register", bit_size),
            ));
        }
        buf.put_u16(parsed as u16);
    }
    Ok(buf.to_vec())
}

/// Minimum number of bytes covering `bits` bits
pub fn byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Reverse a byte sequence in place
pub fn reverse_bytes(bytes: &mut [u8]) {
    let len = bytes.len();
    for i in 0..len / 2 {
        bytes.swap(i, len - 1 - i);
    }
}

/// Build the coil bitmap sent with a multiple-coil write
pub fn coil_payload<S: AsRef<str>>(values: &[S]) -> Result<Vec<u8>> {
    let packed = pack_bits(values)?;

    let mut buf = BytesMut::with_capacity(8);
    buf.put_u64(packed);
    reverse_bytes(&mut buf);
    buf.truncate(byte_len(values.len()));

    tracing::debug!("coil payload: {:?}", &buf[..]);
    Ok(buf.to_vec())
}

/// Expand `count` coil states from a bitmap (bit 0 of byte 0 first)
pub fn unpack_bits(bytes: &[u8], count: usize) -> Vec<bool> {
    (0..count)
        .take_while(|i| i / 8 < bytes.len())
        .map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
        .collect()
}
