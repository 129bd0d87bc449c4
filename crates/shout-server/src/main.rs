//! Shout server entry point.
//!
//! Wires together configuration, logging, and the network listener, then
//! accepts connections until a shutdown signal arrives.
//!
//! ```text
//! main()
//!  └─ load_config("shout.toml")   -- absent file → stock defaults
//!  └─ Server::bind()              -- fatal on failure
//!  └─ Server::run()               -- accept loop, one task per connection
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shout_server::infrastructure::network::Server;
use shout_server::infrastructure::storage::load_config;

/// Config file read from the working directory; absent means stock defaults.
const CONFIG_PATH: &str = "shout.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("shout server starting");

    let config = load_config(Path::new(CONFIG_PATH))
        .with_context(|| format!("loading {CONFIG_PATH}"))?;

    let server = Server::bind(&config).await?;
    info!("listening on {}", server.local_addr()?);
    if let Some(limit) = config.limits.max_sessions {
        info!("admission limited to {limit} concurrent sessions");
    }

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
    }

    info!("shout server stopped");
    Ok(())
}
