//! Per-connection session handler.
//!
//! Each session is a small state machine: Active → (repeat) → Closed.
//! While Active it reads one frame, uppercases the payload, and writes the
//! response (the same length prefix, the transformed bytes), then waits for
//! the next frame. Requests on one connection are strictly sequential; a
//! response always completes before the next length prefix is read.
//!
//! The session ends when the peer closes at a frame boundary (graceful), the
//! declared length fails validation (protocol violation: no response is
//! sent and the payload region is never read), or the stream fails. All
//! three paths converge on the same teardown: the owned stream is dropped
//! (closing the socket exactly once) and the gauge is decremented.
//!
//! The state machine itself, [`serve_connection`], is generic over the
//! stream so the tests drive it over in-memory duplex pipes.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::OwnedSemaphorePermit;
use tracing::{debug, info, warn};

use shout_core::protocol::codec::FrameError;
use shout_core::protocol::framing::{read_frame, write_frame, RecvError, SendError};
use shout_core::shout;

use crate::application::SessionGauge;

/// Why a session's request loop ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The peer closed the connection at a frame boundary.
    PeerClosed,
    /// The peer sent a length prefix outside the allowed bounds.
    ProtocolViolation(FrameError),
    /// The stream failed, including a close in the middle of a frame.
    IoFailure(io::Error),
}

/// Runs the request/response loop over `stream` until the session ends.
///
/// Request content is never rejected (only framing validity is), and there
/// is no limit on the number of sequential requests one connection may send.
pub async fn serve_connection<S>(stream: &mut S) -> SessionEnd
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let mut payload = match read_frame(stream).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return SessionEnd::PeerClosed,
            Err(RecvError::Frame(e)) => return SessionEnd::ProtocolViolation(e),
            Err(RecvError::Io(e)) => return SessionEnd::IoFailure(e),
        };

        shout(&mut payload);

        if let Err(e) = write_frame(stream, &payload).await {
            return match e {
                SendError::Frame(e) => SessionEnd::ProtocolViolation(e),
                SendError::Io(e) => SessionEnd::IoFailure(e),
            };
        }
    }
}

/// Session task entry point: gauge accounting, the request loop, teardown.
///
/// The optional `permit` is the admission slot acquired by the dispatcher;
/// holding it here keeps the slot occupied for the session's lifetime, and
/// dropping it on return releases the slot to the accept loop.
pub(crate) async fn run(
    stream: TcpStream,
    peer: SocketAddr,
    gauge: Arc<SessionGauge>,
    _permit: Option<OwnedSemaphorePermit>,
) {
    let now = gauge.increment();
    info!("client connected from {peer}, now={now}");

    let mut stream = stream;
    match serve_connection(&mut stream).await {
        SessionEnd::PeerClosed => debug!("peer {peer} closed the session"),
        SessionEnd::ProtocolViolation(e) => warn!("tearing down session with {peer}: {e}"),
        SessionEnd::IoFailure(e) => warn!("I/O failure on session with {peer}: {e}"),
    }
    drop(stream);

    let now = gauge.decrement();
    info!("client disconnected from {peer}, now={now}");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
