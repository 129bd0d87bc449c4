//! Application layer: use cases for the client.

pub mod send_batch;

pub use send_batch::{send_batch, FlowReport};
