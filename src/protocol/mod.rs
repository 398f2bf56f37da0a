//! Protocol Module
//!
//! Typed requests and responses for the five supported operations.
//!
//! ## Operations
//! ```text
//! ┌────────────────────────┬──────┬───────────────────────────────┐
//! │ CLI name               │ FC   │ Operands                      │
//! ├────────────────────────┼──────┼───────────────────────────────┤
//! │ readCoils              │ 0x01 │ -address, -size               │
//! │ writeSingleCoil        │ 0x05 │ -address, value (0 = off)     │
//! │ writeMultipleCoils     │ 0x0F │ -address, 0/1 values          │
//! │ writeSingleRegister    │ 0x10 │ -address, values              │
//! │ writeMultipleRegisters │ 0x10 │ -address, values              │
//! └────────────────────────┴──────┴───────────────────────────────┘
//! ```

mod operation;
mod request;
mod response;

pub use operation::Operation;
pub use request::{Request, COIL_OFF, COIL_ON};
pub use response::{format_bytes, Response};
