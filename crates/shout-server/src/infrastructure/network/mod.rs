//! Network infrastructure for the server: the listener and dispatch loop.
//!
//! Architecture:
//! - [`Server`] owns the TCP listener, the session gauge, and the optional
//!   admission semaphore.
//! - The dispatch loop accepts connections forever and spawns one
//!   independent task per connection running the session state machine in
//!   [`session`]. It never waits for a session to finish.
//! - A failed accept never tears the listener down: a transient interruption
//!   is retried silently, anything else is logged and the loop keeps
//!   accepting. Likewise a connection the server cannot admit is simply
//!   dropped; the service keeps running.

pub mod session;

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::application::SessionGauge;
use crate::infrastructure::storage::ServerConfig;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured bind address is not a valid IP address.
    #[error("invalid bind address {addr:?}: {source}")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// The listener could not be bound.
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// The shout server: a bound listener plus its shared session state.
pub struct Server {
    listener: TcpListener,
    gauge: Arc<SessionGauge>,
    limiter: Option<Arc<Semaphore>>,
}

impl Server {
    /// Binds the listener described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the address does not parse or the bind
    /// fails. These are the only startup failures the server treats as
    /// fatal.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServeError> {
        let ip: IpAddr =
            config
                .network
                .bind_address
                .parse()
                .map_err(|source| ServeError::InvalidBindAddress {
                    addr: config.network.bind_address.clone(),
                    source,
                })?;
        let addr = SocketAddr::new(ip, config.network.port);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::BindFailed { addr, source })?;

        Ok(Self {
            listener,
            gauge: Arc::new(SessionGauge::new()),
            limiter: config
                .limits
                .max_sessions
                .map(|n| Arc::new(Semaphore::new(n))),
        })
    }

    /// Returns the address the listener is actually bound to.
    ///
    /// With port 0 in the config this is where the OS-assigned port shows up.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Returns a handle to the live-session gauge.
    pub fn session_gauge(&self) -> Arc<SessionGauge> {
        Arc::clone(&self.gauge)
    }

    /// Accepts connections forever, spawning one session task per connection.
    ///
    /// When `limits.max_sessions` is configured, an admission permit is
    /// acquired before each accept and travels with the session task, so at
    /// most that many sessions are ever live; further connections wait in
    /// the OS accept backlog.
    ///
    /// This function does not return during normal operation.
    ///
    /// # Errors
    ///
    /// The `Result` exists for signature symmetry with startup; no error is
    /// produced by the loop itself, since accept failures are contained and
    /// logged.
    pub async fn run(&self) -> Result<(), ServeError> {
        loop {
            let permit = match &self.limiter {
                // The semaphore is never closed, so acquire cannot fail.
                Some(sem) => Arc::clone(sem).acquire_owned().await.ok(),
                None => None,
            };

            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let gauge = Arc::clone(&self.gauge);
                    tokio::spawn(session::run(stream, peer, gauge, permit));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("accept failed: {e}; continuing to listen");
                }
            }
        }
    }
}
