//! Connection Handler
//!
//! Blocking TCP transport for a single Modbus server.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;

use super::Transport;
use crate::config::Config;
use crate::error::{MbError, Result};

/// MBAP header: transaction id (2) + protocol id (2) + length (2)
pub const MBAP_HEADER_SIZE: usize = 6;

/// Largest Modbus TCP frame
pub const MAX_ADU_SIZE: usize = 260;

/// Shortest meaningful response: header + unit id + function code
const MIN_RESPONSE_SIZE: usize = MBAP_HEADER_SIZE + 2;

/// An open connection to a Modbus TCP server
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Resolve the configured target and connect to the first address that answers
    pub fn connect(config: &Config) -> Result<Self> {
        let target = config.target();
        let addrs: Vec<_> = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| MbError::Network(format!("cannot resolve {}: {}", target, e)))?
            .collect();

        if addrs.is_empty() {
            return Err(MbError::Network(format!("no addresses for {}", target)));
        }

        let timeout = Duration::from_millis(config.timeout_ms);
        let mut last_err = None;
        for addr in addrs {
            tracing::debug!("Connecting to {}", addr);
            let attempt = if config.timeout_ms > 0 {
                TcpStream::connect_timeout(&addr, timeout)
            } else {
                TcpStream::connect(addr)
            };
            match attempt {
                Ok(stream) => {
                    let connection = Self::from_stream(stream)?;
                    connection.set_timeouts(config.timeout_ms)?;
                    tracing::info!("Connected to {}", connection.peer_addr);
                    return Ok(connection);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(MbError::Network(match last_err {
            Some(e) => format!("cannot connect to {}: {}", target, e),
            None => format!("cannot connect to {}", target),
        }))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Requests are tiny and latency bound
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure read and write timeouts (0 leaves the socket blocking)
    pub fn set_timeouts(&self, ms: u64) -> Result<()> {
        if ms > 0 {
            let timeout = Some(Duration::from_millis(ms));
            self.reader.get_ref().set_read_timeout(timeout)?;
            self.writer.get_ref().set_write_timeout(timeout)?;
        }
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn read_frame(&mut self) -> Result<Vec<u8>> {
        let mut header = [0u8; MBAP_HEADER_SIZE];
        self.reader.read_exact(&mut header)?;

        let protocol_id = u16::from_be_bytes([header[2], header[3]]);
        if protocol_id != 0 {
            return Err(MbError::Protocol(format!(
                "unexpected protocol id {} in response",
                protocol_id
            )));
        }

        let frame_len = MBAP_HEADER_SIZE + u16::from_be_bytes([header[4], header[5]]) as usize;
        if frame_len < MIN_RESPONSE_SIZE || frame_len > MAX_ADU_SIZE {
            return Err(MbError::Protocol(format!(
                "invalid response length field: {} bytes",
                frame_len - MBAP_HEADER_SIZE
            )));
        }

        let mut frame = BytesMut::with_capacity(frame_len);
        frame.extend_from_slice(&header);
        frame.resize(frame_len, 0);
        self.reader.read_exact(&mut frame[MBAP_HEADER_SIZE..])?;

        Ok(frame.to_vec())
    }
}

impl Transport for Connection {
    fn transact(&mut self, adu: &[u8]) -> Result<Vec<u8>> {
        tracing::trace!("-> {} {:02x?}", self.peer_addr, adu);
        self.writer.write_all(adu)?;
        self.writer.flush()?;

        let response = self.read_frame()?;
        tracing::trace!("<- {} {:02x?}", self.peer_addr, response);
        Ok(response)
    }
}
