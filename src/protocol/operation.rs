//! Operation names
//!
//! Maps the `-operation` flag to a typed operation.

use std::fmt;
use std::str::FromStr;

use crate::error::MbError;

/// Operation requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ReadCoils,
    WriteSingleCoil,
    WriteMultipleCoils,
    WriteSingleRegister,
    WriteMultipleRegisters,
}

impl Operation {
    /// All operations, in the order they are listed to users
    pub const ALL: [Operation; 5] = [
        Operation::WriteSingleCoil,
        Operation::WriteMultipleRegisters,
        Operation::WriteMultipleCoils,
        Operation::WriteSingleRegister,
        Operation::ReadCoils,
    ];

    /// Name as spelled on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ReadCoils => "readCoils",
            Operation::WriteSingleCoil => "writeSingleCoil",
            Operation::WriteMultipleCoils => "writeMultipleCoils",
            Operation::WriteSingleRegister => "writeSingleRegister",
            Operation::WriteMultipleRegisters => "writeMultipleRegisters",
        }
    }

    /// Modbus function code used for this operation
    pub fn function_code(&self) -> u8 {
        match self {
            Operation::ReadCoils => 0x01,
            Operation::WriteSingleCoil => 0x05,
            Operation::WriteMultipleCoils => 0x0F,
            Operation::WriteSingleRegister | Operation::WriteMultipleRegisters => 0x10,
        }
    }
}

impl FromStr for Operation {
    type Err = MbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| MbError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
