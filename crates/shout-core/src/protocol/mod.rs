//! Protocol module containing the wire codec and the framed I/O primitives.

pub mod codec;
pub mod framing;

pub use codec::{decode_length, encode_frame, validate_length, FrameError, LEN_PREFIX_SIZE, MAX_FRAME};
pub use framing::{read_frame, read_full, write_frame, write_full, ReadOutcome, RecvError, SendError};
