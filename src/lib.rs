#![deny(missing_docs)]
//! An FTP server library for Rust that speaks the classic command dialog over
//! a multiplexed QUIC session.
//!
//! Unlike a traditional FTP server, which opens one TCP connection per data
//! transfer, libquftp reuses a single encrypted QUIC session for everything:
//! each bidirectional stream carries an independent command/reply dialog and
//! unidirectional streams carry file bodies and directory listings, referenced
//! by their numeric stream id.
//!
//! Because of its plugable authentication and storage back-ends it can serve
//! more than just the local filesystem.
//!
//! # Quick Start
//!
//! ```no_run
//! use libquftp::Server;
//! use libquftp::storage::FilesystemFactory;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::new(Box::new(FilesystemFactory::new(std::env::temp_dir())))
//!         .greeting("Welcome to my QUIC-FTP server")
//!         .certs("cert.pem", "key.pem")
//!         .port(2121);
//!
//!     server.listen().await.unwrap();
//! }
//! ```

pub mod auth;
pub(crate) mod server;
pub mod storage;

pub use crate::server::{Server, ServerError, ShutdownHandle};
