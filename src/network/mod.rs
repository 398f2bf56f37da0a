//! Network Module
//!
//! Modbus TCP client and the socket transport underneath it.
//!
//! ## Architecture
//! - `Transport` moves one request ADU out and one response ADU back
//! - `Connection` is the blocking TCP transport
//! - `TcpClient` builds and checks frames with rmodbus

mod client;
mod connection;

pub use client::{Client, TcpClient, Transport};
pub use connection::{Connection, MAX_ADU_SIZE, MBAP_HEADER_SIZE};
