//! Infrastructure layer: the network request driver.

pub mod network;
