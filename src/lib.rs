//! # mbtool
//!
//! Issues one Modbus TCP request per invocation:
//! - Read coils
//! - Write single / multiple coils
//! - Write single / multiple holding registers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI flags + values                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Request::build (argument conversion)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   dispatch::execute                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  TcpClient  │ ───────► │ Connection  │
//!   │  (rmodbus)  │          │ (TcpStream) │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod convert;
pub mod protocol;
pub mod network;
pub mod dispatch;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MbError, Result};
pub use config::Config;
pub use protocol::{Operation, Request, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mbtool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
