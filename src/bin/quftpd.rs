//! A very simple QUIC-FTP daemon using libquftp as a library, serving a
//! directory of the local filesystem. Handy as an example and as something
//! to run tests against.

use clap::Parser;
use libquftp::auth::SimpleAuthenticator;
use libquftp::storage::FilesystemFactory;
use libquftp::Server;
use slog::{o, Drain};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "quftpd", about = "An example QUIC-FTP server serving a local directory")]
struct Args {
    /// Root directory to serve
    #[arg(long)]
    root: PathBuf,

    /// Username for login
    #[arg(long, default_value = "admin")]
    user: String,

    /// Password for login
    #[arg(long, default_value = "123456")]
    pass: String,

    /// Port to listen on
    #[arg(long, default_value_t = 2121)]
    port: u16,

    /// Hostname to listen on
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Path to the TLS certificate chain (PEM)
    #[arg(long)]
    cert: PathBuf,

    /// Path to the TLS private key (PEM)
    #[arg(long)]
    key: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, o!());

    slog::info!(logger, "Starting QUIC-FTP server on {}:{}", args.host, args.port);
    slog::info!(logger, "Username {}, Password {}", args.user, args.pass);

    let server = Server::new(Box::new(FilesystemFactory::new(args.root)))
        .authenticator(Arc::new(SimpleAuthenticator::new(args.user, args.pass)))
        .host(args.host)
        .port(args.port)
        .certs(args.cert, args.key)
        .logger(logger.clone());

    if let Err(err) = server.listen().await {
        slog::error!(logger, "Error running server: {}", err);
        std::process::exit(1);
    }
}
