//! Shout client entry point.
//!
//! Sends the configured message set to the server (one concurrent
//! connection per message) and logs each response as text.
//!
//! ```text
//! main()
//!  └─ DriverConfig::default()   -- loopback:5555, stock message set
//!  └─ send_batch()              -- one task per message, all awaited
//!  └─ per-flow report lines
//! ```

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shout_client::application::send_batch;
use shout_client::infrastructure::network::DriverConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DriverConfig::default();
    info!(
        "shout client starting: {} requests to {}",
        config.messages.len(),
        config.server_addr
    );

    for report in send_batch(&config).await {
        match report.result {
            Ok(payload) => info!(
                "[client {}] got: {}",
                report.id,
                String::from_utf8_lossy(&payload)
            ),
            Err(e) => warn!("[client {}] {e}", report.id),
        }
    }

    Ok(())
}
