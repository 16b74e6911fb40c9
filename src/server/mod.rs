//! The acceptor: binds the QUIC endpoint, accepts sessions and hands each
//! one to a [`session::Conn`] supervisor.

pub(crate) mod controlchan;
mod error;
pub(crate) mod session;
mod tls;

pub use error::ServerError;

use crate::auth::{AnonymousAuthenticator, Authenticator};
use crate::storage::DriverFactory;
use futures::FutureExt;
use quinn::{Endpoint, TransportConfig, VarInt};
use session::Conn;
use slog::o;
use std::{
    net::{SocketAddr, ToSocketAddrs},
    path::PathBuf,
    sync::Arc,
};
use tokio::sync::watch;

const DEFAULT_NAME: &str = "quftp QUIC-FTP Server";
const DEFAULT_GREETING: &str = "Welcome to the quftp QUIC-FTP server";
const DEFAULT_HOST: &str = "::";
const DEFAULT_PORT: u16 = 3000;

// Like the vsftpd default, but uni- and bidirectional streams are limited
// separately.
const MAX_STREAMS_PER_SESSION: u32 = 3;
// Like the Linux default for /proc/sys/net/core/rmem_max.
const MAX_STREAM_FLOW_CONTROL: u32 = 212992;

/// An instance of a QUIC-FTP server. It holds a reference to an
/// [`Authenticator`] that will be used for authentication and a
/// [`DriverFactory`] that produces one storage driver per command dialog.
///
/// Configure it in a builder-like fashion and then call
/// [`listen`](Server::listen):
///
/// ```no_run
/// use libquftp::Server;
/// use libquftp::storage::FilesystemFactory;
///
/// # async fn run() {
/// let server = Server::new(Box::new(FilesystemFactory::new("/srv/ftp")))
///     .port(2121)
///     .certs("cert.pem", "key.pem");
/// server.listen().await.unwrap();
/// # }
/// ```
pub struct Server {
    driver_factory: Box<dyn DriverFactory>,
    authenticator: Arc<dyn Authenticator>,
    name: String,
    host: String,
    port: u16,
    public_ip: Option<String>,
    greeting: String,
    certs_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
    logger: slog::Logger,
    feats: String,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

/// A handle that asks a running [`Server`] to stop accepting sessions.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Requests a graceful stop: the acceptor returns
    /// [`ServerError::Closed`], while already accepted sessions keep running
    /// until their clients are done.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

impl Server {
    /// Construct a new [`Server`] with the given driver factory. All other
    /// parameters start at their defaults: anonymous authentication, host
    /// `::`, port 3000, a discarding logger.
    pub fn new(driver_factory: Box<dyn DriverFactory>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Server {
            driver_factory,
            authenticator: Arc::new(AnonymousAuthenticator),
            name: DEFAULT_NAME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_ip: None,
            greeting: DEFAULT_GREETING.to_string(),
            certs_file: None,
            key_file: None,
            logger: slog::Logger::root(slog::Discard, o!()),
            feats: controlchan::commands::feature_text(),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Set the [`Authenticator`] that will be used for authentication.
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Set the name the server reports about itself in its startup log.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the hostname or address the server binds to.
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port the server binds to. In a production environment you
    /// will probably want something better known than the default.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the public address of the server, when it differs from the bound
    /// one. Only surfaced in the startup log; the multiplexed transport has
    /// no passive-mode address to advertise.
    pub fn public_ip<S: Into<String>>(mut self, public_ip: S) -> Self {
        self.public_ip = Some(public_ip.into());
        self
    }

    /// Set the greeting sent on the first control stream of every session.
    pub fn greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the PEM files holding the TLS certificate chain and private key.
    /// QUIC has no plaintext mode, so these are required before `listen`.
    pub fn certs<P: Into<PathBuf>>(mut self, certs_file: P, key_file: P) -> Self {
        self.certs_file = Some(certs_file.into());
        self.key_file = Some(key_file.into());
        self
    }

    /// Set the logger all session and dialog loggers derive from. Defaults
    /// to discarding everything.
    pub fn logger(mut self, logger: slog::Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Returns a handle that can stop this server later, from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Binds the configured address, then accepts sessions until a shutdown
    /// is requested. Common startup errors are a privileged port or missing
    /// certificate material.
    pub async fn listen(self) -> Result<(), ServerError> {
        let (certs_file, key_file) = match (&self.certs_file, &self.key_file) {
            (Some(certs_file), Some(key_file)) => (certs_file, key_file),
            _ => {
                return Err(ServerError::Config(
                    "a TLS certificate and key are required, see Server::certs".to_string(),
                ))
            }
        };

        let crypto = tls::server_crypto(certs_file, key_file).map_err(ServerError::Tls)?;
        let mut server_config = quinn::ServerConfig::with_crypto(crypto);
        server_config.transport_config(Arc::new(transport_config()));

        let addr = bind_address(&self.host, self.port).map_err(ServerError::Bind)?;
        let endpoint = Endpoint::server(server_config, addr).map_err(ServerError::Bind)?;

        slog::info!(self.logger, "{} listening on {}", self.name, self.port);
        if let Some(public_ip) = &self.public_ip {
            slog::info!(self.logger, "publicly reachable as {}", public_ip);
        }

        self.serve(endpoint).await
    }

    /// Accepts sessions on an already bound endpoint and handles each in a
    /// new task. Returns [`ServerError::Closed`] once a shutdown is
    /// requested or the endpoint goes away.
    pub async fn serve(self, endpoint: Endpoint) -> Result<(), ServerError> {
        let server = Arc::new(self);
        let mut shutdown_rx = server.shutdown_rx.clone();
        loop {
            tokio::select! {
                _ = shutdown_rx.wait_for(|stop| *stop).map(|_| ()) => {
                    return Err(ServerError::Closed);
                }
                incoming = endpoint.accept() => {
                    let Some(incoming) = incoming else {
                        return Err(ServerError::Closed);
                    };
                    // Handshake failures are scoped to one client, never
                    // fatal for the acceptor.
                    let connection = match incoming.await {
                        Ok(connection) => connection,
                        Err(err) => {
                            slog::error!(server.logger, "listening error: {}", err);
                            continue;
                        }
                    };
                    // Probe the factory once per session before anything is
                    // spawned for it.
                    if let Err(err) = server.driver_factory.new_driver() {
                        slog::error!(server.logger, "Error creating driver, aborting client connection: {}", err);
                        connection.close(0u32.into(), b"");
                        continue;
                    }
                    let conn = Arc::new(Conn::new(Arc::clone(&server), connection));
                    tokio::spawn(conn.serve());
                }
            }
        }
    }
}

// The transport knobs this server always runs with: few streams, a fixed
// flow-control window and no keepalive, mirroring a conservative FTP setup.
fn transport_config() -> TransportConfig {
    let mut transport = TransportConfig::default();
    transport
        .max_concurrent_bidi_streams(VarInt::from_u32(MAX_STREAMS_PER_SESSION))
        .max_concurrent_uni_streams(VarInt::from_u32(MAX_STREAMS_PER_SESSION))
        .stream_receive_window(VarInt::from_u32(MAX_STREAM_FLOW_CONTROL))
        // One extra window as buffer for the control streams.
        .receive_window(VarInt::from_u32(MAX_STREAM_FLOW_CONTROL * (MAX_STREAMS_PER_SESSION + 1)))
        .keep_alive_interval(None);
    transport
}

fn bind_address(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::AddrNotAvailable, "could not resolve bind address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_accepts_ips_and_names() {
        assert_eq!(bind_address("::", 3000).unwrap().port(), 3000);
        assert_eq!(bind_address("127.0.0.1", 2121).unwrap(), "127.0.0.1:2121".parse().unwrap());
        assert!(bind_address("localhost", 2121).is_ok());
    }

    #[test]
    fn shutdown_handle_makes_serve_return() {
        let (tx, mut rx) = watch::channel(false);
        let handle = ShutdownHandle { tx };
        handle.shutdown();
        assert!(*rx.borrow_and_update());
    }
}
