//! The error type returned when starting or running the acceptor.

use thiserror::Error;

/// The errors [`Server::listen`](crate::Server::listen) and
/// [`Server::serve`](crate::Server::serve) can return.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A shutdown was requested; already accepted sessions keep running.
    #[error("quftp: server closed")]
    Closed,
    /// The TLS certificate or private key could not be loaded.
    #[error("TLS configuration failed: {0}")]
    Tls(#[source] std::io::Error),
    /// The UDP endpoint could not be bound.
    #[error("binding the endpoint failed: {0}")]
    Bind(#[source] std::io::Error),
    /// The server was configured inconsistently, e.g. without certificates.
    #[error("invalid server configuration: {0}")]
    Config(String),
}
