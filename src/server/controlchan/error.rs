//! Contains the `ControlChanError` type that the control channel machinery
//! propagates internally. Everything the client is supposed to see becomes a
//! numeric reply instead.

use thiserror::Error;

/// The error type used by the control channel and the command handlers.
#[derive(Debug, Error)]
pub enum ControlChanError {
    /// We encountered a system IO error.
    #[error("failed to perform IO: {0}")]
    Io(#[from] std::io::Error),
    /// We encountered a non-UTF8 character in a command line.
    #[error("non-UTF8 character in command")]
    Utf8(#[from] std::str::Utf8Error),
    /// The QUIC session failed underneath us.
    #[error("transport session error: {0}")]
    Connection(#[from] quinn::ConnectionError),
    /// Writing to a data stream failed.
    #[error("failed to write to data stream: {0}")]
    DataWrite(#[from] quinn::WriteError),
    /// The client referenced an inbound data stream the session can no longer
    /// produce: a stream with a higher id has already been accepted.
    #[error("could not get wanted stream")]
    StreamOrdering,
}
