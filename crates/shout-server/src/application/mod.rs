//! Application layer: use cases for the server.

pub mod track_sessions;

pub use track_sessions::SessionGauge;
