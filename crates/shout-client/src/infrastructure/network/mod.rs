//! Network infrastructure for the client: one connection per request.
//!
//! A flow is the full lifecycle of one message: connect, send one frame,
//! read one frame, close. The connection is owned by [`request`] and closed
//! on every exit path, success and failure alike, when the stream drops.
//!
//! Messages longer than the frame limit are silently truncated to
//! [`MAX_FRAME`] bytes before sending, matching the service's stock
//! behavior; the truncation is a known limitation, not an error.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpStream;

use shout_core::protocol::codec::{FrameError, MAX_FRAME};
use shout_core::protocol::framing::{read_frame, write_frame, RecvError, SendError};

/// Errors that can end a single request flow.
///
/// Every variant is contained to its own flow; the driver reports it and
/// moves on.
#[derive(Debug, Error)]
pub enum DriverError {
    /// TCP connection to the server failed.
    #[error("failed to connect to server at {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The request frame could not be sent.
    #[error("failed to send request: {0}")]
    Send(#[from] SendError),

    /// The server closed the connection without sending a response frame.
    #[error("no response: server closed the connection")]
    NoResponse,

    /// The response carried a length prefix outside the allowed bounds.
    #[error("bad response length: {0}")]
    BadResponseLength(FrameError),

    /// The stream failed while reading the response.
    #[error("failed to receive response: {0}")]
    Recv(std::io::Error),
}

/// Configuration for the request driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Address of the shout server.
    pub server_addr: SocketAddr,
    /// Messages to send; each one gets its own concurrent connection.
    pub messages: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 5555)),
            messages: vec![
                "hello".to_string(),
                "thread test".to_string(),
                "abcDef".to_string(),
                "systems programming".to_string(),
                "saba".to_string(),
            ],
        }
    }
}

/// Runs one request flow: connect, send `message` framed, return the framed
/// response payload.
///
/// # Errors
///
/// Returns a [`DriverError`] describing where the flow ended; the connection
/// is closed in every case.
pub async fn request(addr: SocketAddr, message: &[u8]) -> Result<Vec<u8>, DriverError> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|source| DriverError::ConnectFailed { addr, source })?;

    // Silent truncation to the frame limit.
    let body = &message[..message.len().min(MAX_FRAME)];
    write_frame(&mut stream, body).await?;

    match read_frame(&mut stream).await {
        Ok(Some(payload)) => Ok(payload),
        Ok(None) => Err(DriverError::NoResponse),
        Err(RecvError::Frame(e)) => Err(DriverError::BadResponseLength(e)),
        Err(RecvError::Io(e)) => Err(DriverError::Recv(e)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_config_default_targets_loopback_5555() {
        let cfg = DriverConfig::default();
        assert_eq!(cfg.server_addr, SocketAddr::from(([127, 0, 0, 1], 5555)));
    }

    #[test]
    fn test_driver_config_default_carries_the_stock_message_set() {
        let cfg = DriverConfig::default();
        assert_eq!(
            cfg.messages,
            vec![
                "hello",
                "thread test",
                "abcDef",
                "systems programming",
                "saba"
            ]
        );
    }
}
