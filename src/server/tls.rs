//! Builds the rustls/QUIC crypto configuration from PEM files on disk.

use quinn::crypto::rustls::QuicServerConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

// The ALPN token announced by this protocol.
pub(crate) const ALPN_FTP: &[u8] = b"ftp";

pub(crate) fn server_crypto<P: AsRef<Path>>(certs_file: P, key_file: P) -> std::io::Result<Arc<QuicServerConfig>> {
    let certs = load_certs(certs_file)?;
    let key = load_private_key(key_file)?;

    let mut config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    config.alpn_protocols = vec![ALPN_FTP.to_vec()];

    let quic = QuicServerConfig::try_from(config).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    Ok(Arc::new(quic))
}

fn load_certs<P: AsRef<Path>>(filename: P) -> std::io::Result<Vec<CertificateDer<'static>>> {
    let certfile = File::open(filename)?;
    let mut reader = BufReader::new(certfile);
    rustls_pemfile::certs(&mut reader).collect()
}

fn load_private_key<P: AsRef<Path>>(filename: P) -> std::io::Result<PrivateKeyDer<'static>> {
    let keyfile = File::open(filename)?;
    let mut reader = BufReader::new(keyfile);
    rustls_pemfile::private_key(&mut reader)?
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no private key found"))
}
