//! Binary codec for the shout wire format.
//!
//! Wire format:
//! ```text
//! [length:4][payload:N]
//! ```
//! `length` is an unsigned 32-bit big-endian integer giving the exact number
//! of payload bytes that follow. No compression, no checksum. A declared
//! length outside `[0, MAX_FRAME]` is a protocol violation: the receiver must
//! tear the connection down without reading the payload region, whose
//! contents can no longer be trusted.
//!
//! Both peers apply the same validation; the codec is the single place the
//! limit is defined.

use thiserror::Error;

/// Maximum allowed payload length in bytes.
pub const MAX_FRAME: usize = 4096;

/// Size of the length prefix in bytes.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Errors that can occur while building or validating a frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The payload handed to [`encode_frame`] exceeds [`MAX_FRAME`].
    #[error("payload of {len} bytes exceeds the {MAX_FRAME}-byte frame limit")]
    PayloadTooLarge { len: usize },

    /// A decoded length prefix lies outside `[0, MAX_FRAME]`.
    #[error("declared frame length {declared} is outside [0, {MAX_FRAME}]")]
    LengthOutOfBounds { declared: u32 },
}

/// Encodes `payload` into a complete frame: length prefix plus payload bytes.
///
/// # Errors
///
/// Returns [`FrameError::PayloadTooLarge`] if the payload exceeds
/// [`MAX_FRAME`]; callers that want the original truncation behavior must
/// truncate before encoding.
///
/// # Examples
///
/// ```rust
/// use shout_core::protocol::codec::encode_frame;
///
/// let frame = encode_frame(b"abcDef").unwrap();
/// assert_eq!(&frame[..4], &[0x00, 0x00, 0x00, 0x06]);
/// assert_eq!(&frame[4..], b"abcDef");
/// ```
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_FRAME {
        return Err(FrameError::PayloadTooLarge { len: payload.len() });
    }
    let mut buf = Vec::with_capacity(LEN_PREFIX_SIZE + payload.len());
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Interprets a length prefix as a big-endian unsigned 32-bit integer.
pub fn decode_length(prefix: [u8; LEN_PREFIX_SIZE]) -> u32 {
    u32::from_be_bytes(prefix)
}

/// Checks a declared payload length against the frame limit.
///
/// # Errors
///
/// Returns [`FrameError::LengthOutOfBounds`] for any length above
/// [`MAX_FRAME`]. Zero is a valid length (an empty payload).
///
/// # Examples
///
/// ```rust
/// use shout_core::protocol::codec::{validate_length, FrameError};
///
/// assert_eq!(validate_length(4096), Ok(4096));
/// assert_eq!(
///     validate_length(4097),
///     Err(FrameError::LengthOutOfBounds { declared: 4097 })
/// );
/// ```
pub fn validate_length(declared: u32) -> Result<usize, FrameError> {
    let len = declared as usize;
    if len > MAX_FRAME {
        return Err(FrameError::LengthOutOfBounds { declared });
    }
    Ok(len)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
