//! shout-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The client is deliberately fire-and-forget: for every configured message
//! it opens its own connection, sends one framed request, reads one framed
//! response, reports it, and hangs up. All flows run concurrently and none
//! of them can fail another.

pub mod application;
pub mod infrastructure;
