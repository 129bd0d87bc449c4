//! Concurrent fan-out of the configured messages.
//!
//! One task per message, all running independently; the batch completes only
//! when every flow has finished, and a failed flow never aborts the others.

use tracing::error;

use crate::infrastructure::network::{self, DriverConfig, DriverError};

/// Outcome of one request flow, tagged with the flow's index and message.
#[derive(Debug)]
pub struct FlowReport {
    pub id: usize,
    pub message: String,
    pub result: Result<Vec<u8>, DriverError>,
}

/// Sends every configured message on its own concurrent connection and
/// collects one report per flow.
///
/// Reports come back in flow order regardless of completion order.
pub async fn send_batch(config: &DriverConfig) -> Vec<FlowReport> {
    let mut handles = Vec::with_capacity(config.messages.len());
    for (id, message) in config.messages.iter().enumerate() {
        let addr = config.server_addr;
        let message = message.clone();
        handles.push(tokio::spawn(async move {
            let result = network::request(addr, message.as_bytes()).await;
            FlowReport { id, message, result }
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(report) => reports.push(report),
            // A panicked flow is its own failure; the rest of the batch
            // still completes and reports.
            Err(e) => error!("request flow aborted: {e}"),
        }
    }
    reports
}
