//! Response definitions
//!
//! Holds the data returned by a client call and renders it for stdout.

use std::fmt;

use super::Operation;
use crate::convert::unpack_bits;

/// Result of a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Operation that produced this response
    pub operation: Operation,

    /// Response data: coil status bytes for reads, echoed value for writes
    pub data: Vec<u8>,

    /// Number of coils requested (reads only)
    pub quantity: Option<u16>,
}

impl Response {
    /// Create a response for a write operation
    pub fn write(operation: Operation, data: Vec<u8>) -> Self {
        Self {
            operation,
            data,
            quantity: None,
        }
    }

    /// Create a response for a coil read
    pub fn coils(data: Vec<u8>, quantity: u16) -> Self {
        Self {
            operation: Operation::ReadCoils,
            data,
            quantity: Some(quantity),
        }
    }

    /// Decoded coil states, present for coil reads
    pub fn coil_states(&self) -> Option<Vec<bool>> {
        self.quantity
            .map(|quantity| unpack_bits(&self.data, quantity as usize))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response {}", format_bytes(&self.data))?;
        if let Some(states) = self.coil_states() {
            let bits: Vec<u8> = states.into_iter().map(u8::from).collect();
            write!(f, "\ncoils {}", format_bytes(&bits))?;
        }
        Ok(())
    }
}

/// Format bytes as `[b0 b1 ...]` in decimal
pub fn format_bytes(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("[{}]", items.join(" "))
}
