//! Exact-length framed I/O over any async byte stream.
//!
//! The two primitives, [`read_full`] and [`write_full`], never perform a
//! short transfer: they loop until the requested byte count has moved or the
//! operation fails. A transient `ErrorKind::Interrupted` is retried in place
//! and never surfaced to the caller.
//!
//! Three outcomes exist for a read:
//!
//! - **Complete** – every requested byte was delivered.
//! - **Closed** – the peer closed the stream before *any* byte of this call
//!   arrived. This marks the end of a session, not an error.
//! - **Failed** – any other I/O error, surfaced as `Err`. A peer that closes
//!   mid-transfer produces `UnexpectedEof` here: the frame boundary was
//!   violated and the session cannot continue cleanly.
//!
//! [`read_frame`] and [`write_frame`] combine the primitives with the codec
//! so that the server handler and the client driver run the identical
//! prefix/validate/payload sequence. Both are free functions generic over
//! the stream type: a deadline or cancellation wrapper composes around them
//! without touching the wire format, and tests drive them over in-memory
//! duplex pipes.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::codec::{self, FrameError, LEN_PREFIX_SIZE};

/// How an exact-length read ended. The Failed outcome travels as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Every requested byte was delivered.
    Complete,
    /// The peer closed the stream before any byte of this call arrived.
    Closed,
}

/// Errors produced while receiving one frame.
#[derive(Debug, Error)]
pub enum RecvError {
    /// The declared length failed validation. The payload region was not read.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The stream failed, including a peer close in the middle of a frame.
    #[error("I/O failure while receiving a frame: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced while sending one frame.
#[derive(Debug, Error)]
pub enum SendError {
    /// The payload is too large to frame.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The stream failed before the full frame was written.
    #[error("I/O failure while sending a frame: {0}")]
    Io(#[from] io::Error),
}

/// Reads exactly `buf.len()` bytes from `stream`.
///
/// Retries transient interruptions transparently. Callers may assume
/// all-or-nothing: on `Ok(Complete)` the buffer is fully filled, on
/// `Ok(Closed)` it holds nothing from this call.
///
/// # Errors
///
/// Returns the underlying `io::Error` on failure; a peer close after a
/// partial delivery is reported as `UnexpectedEof`.
pub async fn read_full<S>(stream: &mut S, buf: &mut [u8]) -> io::Result<ReadOutcome>
where
    S: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]).await {
            Ok(0) if filled == 0 => return Ok(ReadOutcome::Closed),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("peer closed after {filled} of {} bytes", buf.len()),
                ))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(ReadOutcome::Complete)
}

/// Writes all of `bytes` to `stream`.
///
/// Retries transient interruptions transparently; never performs a short
/// write.
///
/// # Errors
///
/// Returns the underlying `io::Error` on failure, or `WriteZero` if the
/// stream stops accepting bytes.
pub async fn write_full<S>(stream: &mut S, bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < bytes.len() {
        match stream.write(&bytes[written..]).await {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "stream stopped accepting bytes",
                ))
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Receives one frame: length prefix, validation, then the payload.
///
/// Returns `Ok(None)` when the peer closed cleanly at a frame boundary,
/// the normal end of a session.
///
/// # Errors
///
/// Returns [`RecvError::Frame`] when the declared length is out of bounds
/// (the payload region is left unread, and the caller must tear the
/// connection down), or [`RecvError::Io`] when the stream fails, including
/// a peer close inside the frame.
pub async fn read_frame<S>(stream: &mut S) -> Result<Option<Vec<u8>>, RecvError>
where
    S: AsyncRead + Unpin,
{
    let mut prefix = [0u8; LEN_PREFIX_SIZE];
    match read_full(stream, &mut prefix).await? {
        ReadOutcome::Closed => return Ok(None),
        ReadOutcome::Complete => {}
    }

    let len = codec::validate_length(codec::decode_length(prefix))?;

    let mut payload = vec![0u8; len];
    match read_full(stream, &mut payload).await? {
        ReadOutcome::Closed => Err(RecvError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "peer closed between length prefix and payload",
        ))),
        ReadOutcome::Complete => Ok(Some(payload)),
    }
}

/// Sends `payload` as one frame: length prefix followed by the payload bytes.
///
/// # Errors
///
/// Returns [`SendError::Frame`] for payloads above the frame limit and
/// [`SendError::Io`] for stream failures.
pub async fn write_frame<S>(stream: &mut S, payload: &[u8]) -> Result<(), SendError>
where
    S: AsyncWrite + Unpin,
{
    let frame = codec::encode_frame(payload)?;
    write_full(stream, &frame).await?;
    stream.flush().await?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::codec::MAX_FRAME;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{duplex, ReadBuf};

    // ── read_full / write_full primitives ────────────────────────────────────

    #[tokio::test]
    async fn test_read_full_delivers_exactly_requested_bytes() {
        let (mut a, mut b) = duplex(64);
        write_full(&mut a, b"12345678").await.expect("write");

        let mut buf = [0u8; 8];
        let outcome = read_full(&mut b, &mut buf).await.expect("read");
        assert_eq!(outcome, ReadOutcome::Complete);
        assert_eq!(&buf, b"12345678");
    }

    #[tokio::test]
    async fn test_read_full_reassembles_scattered_chunks() {
        // The mock delivers the four bytes in two separate reads; read_full
        // must keep reading until the buffer is full.
        let mut stream = tokio_test::io::Builder::new()
            .read(b"ab")
            .read(b"cd")
            .build();

        let mut buf = [0u8; 4];
        let outcome = read_full(&mut stream, &mut buf).await.expect("read");
        assert_eq!(outcome, ReadOutcome::Complete);
        assert_eq!(&buf, b"abcd");
    }

    #[tokio::test]
    async fn test_read_full_reports_closed_when_no_byte_arrived() {
        let (mut a, b) = duplex(64);
        drop(b);

        let mut buf = [0u8; 4];
        let outcome = read_full(&mut a, &mut buf).await.expect("clean close is not an error");
        assert_eq!(outcome, ReadOutcome::Closed);
    }

    #[tokio::test]
    async fn test_read_full_reports_unexpected_eof_after_partial_delivery() {
        let (mut a, mut b) = duplex(64);
        b.write_all(b"ab").await.expect("partial write");
        drop(b);

        let mut buf = [0u8; 4];
        let err = read_full(&mut a, &mut buf)
            .await
            .expect_err("mid-transfer close must fail");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_read_full_with_empty_buffer_is_complete() {
        let (mut a, _b) = duplex(64);
        let outcome = read_full(&mut a, &mut []).await.expect("read");
        assert_eq!(outcome, ReadOutcome::Complete);
    }

    #[tokio::test]
    async fn test_write_full_round_trips_through_duplex() {
        let (mut a, mut b) = duplex(64);
        write_full(&mut a, b"hello there").await.expect("write");

        let mut buf = [0u8; 11];
        b.read_exact(&mut buf).await.expect("read back");
        assert_eq!(&buf, b"hello there");
    }

    // ── Transient interruption retry ─────────────────────────────────────────

    /// Stream that fails the first read with `Interrupted`, then serves data.
    struct InterruptOnce {
        data: &'static [u8],
        interrupted: bool,
    }

    impl AsyncRead for InterruptOnce {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if !self.interrupted {
                self.interrupted = true;
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::Interrupted)));
            }
            let n = self.data.len().min(buf.remaining());
            buf.put_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_read_full_retries_transient_interruption() {
        let mut stream = InterruptOnce {
            data: b"abcd",
            interrupted: false,
        };

        let mut buf = [0u8; 4];
        let outcome = read_full(&mut stream, &mut buf)
            .await
            .expect("interruption must be retried, not surfaced");
        assert_eq!(outcome, ReadOutcome::Complete);
        assert_eq!(&buf, b"abcd");
    }

    // ── Frame-level round trips ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_write_then_read_frame_round_trips() {
        let (mut a, mut b) = duplex(8192);
        write_frame(&mut a, b"abcDef").await.expect("send");

        let payload = read_frame(&mut b).await.expect("recv").expect("frame");
        assert_eq!(payload, b"abcDef");
    }

    #[tokio::test]
    async fn test_read_frame_zero_length_yields_empty_payload() {
        let (mut a, mut b) = duplex(64);
        write_frame(&mut a, b"").await.expect("send empty");

        let payload = read_frame(&mut b).await.expect("recv").expect("frame");
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_read_frame_max_frame_payload_round_trips() {
        let big = vec![0x7Au8; MAX_FRAME];
        let (mut a, mut b) = duplex(MAX_FRAME + 16);

        let send = write_frame(&mut a, &big);
        let recv = read_frame(&mut b);
        let (sent, received) = tokio::join!(send, recv);
        sent.expect("send");
        assert_eq!(received.expect("recv").expect("frame"), big);
    }

    #[tokio::test]
    async fn test_read_frame_clean_close_at_boundary_is_none() {
        let (mut a, b) = duplex(64);
        drop(b);

        let result = read_frame(&mut a).await.expect("clean close is not an error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_read_frame_rejects_out_of_bounds_length() {
        let (mut a, mut b) = duplex(64);
        // Declared length 4097: one past the limit.
        a.write_all(&4097u32.to_be_bytes()).await.expect("prefix");

        let err = read_frame(&mut b).await.expect_err("must reject");
        assert!(matches!(
            err,
            RecvError::Frame(FrameError::LengthOutOfBounds { declared: 4097 })
        ));
    }

    #[tokio::test]
    async fn test_read_frame_close_between_prefix_and_payload_fails() {
        let (mut a, mut b) = duplex(64);
        a.write_all(&4u32.to_be_bytes()).await.expect("prefix");
        drop(a);

        let err = read_frame(&mut b).await.expect_err("truncated frame must fail");
        match err {
            RecvError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_frame_rejects_oversized_payload() {
        let (mut a, _b) = duplex(64);
        let big = vec![0u8; MAX_FRAME + 1];

        let err = write_frame(&mut a, &big).await.expect_err("must reject");
        assert!(matches!(
            err,
            SendError::Frame(FrameError::PayloadTooLarge { .. })
        ));
    }
}
