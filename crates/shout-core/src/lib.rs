//! # shout-core
//!
//! Shared library for the shout service: the wire codec, the exact-length
//! framed I/O primitives, and the uppercase transform.
//!
//! This crate is used by both the server and client binaries. It has no
//! opinion about sockets, addresses, or scheduling: everything here works
//! over any `AsyncRead`/`AsyncWrite` stream.
//!
//! # Architecture overview
//!
//! Shout is a request/response echo service with one twist: the server
//! uppercases every ASCII letter in the payload before echoing it back.
//! A client opens a connection, sends a framed message, and reads a framed
//! response; the server keeps answering on the same connection until the
//! client hangs up.
//!
//! This crate defines the three pieces both sides share:
//!
//! - **`protocol::codec`** – How bytes travel over the network. One frame is
//!   a 4-byte big-endian length followed by that many raw payload bytes,
//!   with a hard 4096-byte payload limit enforced by both peers.
//!
//! - **`protocol::framing`** – Exact-length reads and writes that tolerate
//!   partial transfers and transient interruptions, plus `read_frame` /
//!   `write_frame` built on top of them.
//!
//! - **`domain::transform`** – The pure uppercase transform applied by the
//!   server. No I/O, no state.

pub mod domain;
pub mod protocol;

// Re-export the most-used items at the crate root so callers can write
// `shout_core::read_frame` instead of `shout_core::protocol::framing::read_frame`.
pub use domain::transform::shout;
pub use protocol::codec::{
    decode_length, encode_frame, validate_length, FrameError, LEN_PREFIX_SIZE, MAX_FRAME,
};
pub use protocol::framing::{
    read_frame, read_full, write_frame, write_full, ReadOutcome, RecvError, SendError,
};
