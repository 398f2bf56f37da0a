//! Dispatch Module
//!
//! Routes a converted request to the matching client call.
//!
//! ## Responsibilities
//! - Map each `Request` variant to one `Client` method
//! - Open exactly one connection per invocation
//! - Stop at the first failure (no retries)

use crate::config::Config;
use crate::error::Result;
use crate::network::{Client, Connection, TcpClient};
use crate::protocol::{Request, Response};

/// Execute one request against a client
pub fn execute<C: Client + ?Sized>(client: &mut C, request: &Request) -> Result<Response> {
    tracing::debug!("Executing {}", request.operation());

    let response = match request {
        Request::ReadCoils { address, quantity } => {
            let data = client.read_coils(*address, *quantity)?;
            Response::coils(data, *quantity)
        }
        Request::WriteSingleCoil { address, value } => {
            let data = client.write_single_coil(*address, *value)?;
            Response::write(request.operation(), data)
        }
        Request::WriteMultipleCoils {
            address,
            quantity,
            payload,
        } => {
            let data = client.write_multiple_coils(*address, *quantity, payload)?;
            Response::write(request.operation(), data)
        }
        Request::WriteSingleRegister {
            address,
            quantity,
            payload,
        }
        | Request::WriteMultipleRegisters {
            address,
            quantity,
            payload,
        } => {
            let data = client.write_multiple_registers(*address, *quantity, payload)?;
            Response::write(request.operation(), data)
        }
    };

    Ok(response)
}

/// Connect to the configured server and execute one request
pub fn run(config: &Config, request: &Request) -> Result<Response> {
    let operation = request.operation();
    tracing::info!(
        "{} (fc {:#04x}) at address {} on {} (unit {})",
        operation,
        operation.function_code(),
        request.address(),
        config.target(),
        config.unit_id
    );

    let connection = Connection::connect(config)?;
    let mut client = TcpClient::new(connection, config.unit_id);
    execute(&mut client, request)
}
