//! End-to-end tests that run a real server on a loopback QUIC endpoint and
//! drive it with an in-process quinn client.

use libquftp::auth::SimpleAuthenticator;
use libquftp::storage::FilesystemFactory;
use libquftp::{Server, ServerError};
use quinn::crypto::rustls::{QuicClientConfig, QuicServerConfig};
use rustls::pki_types::PrivatePkcs8KeyDer;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const USER: &str = "admin";
const PASS: &str = "123456";

struct TestRig {
    root: tempfile::TempDir,
    conn: quinn::Connection,
    // The endpoints drive the connections; keep them alive for the test.
    _client: quinn::Endpoint,
}

/// Starts a server over a fresh temp directory and connects a client session
/// to it. Each test gets its own server.
async fn rig() -> TestRig {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let cert_der = cert.cert.der().clone();
    let key = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());

    let mut server_crypto = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![cert_der.clone()], key.into())
        .unwrap();
    server_crypto.alpn_protocols = vec![b"ftp".to_vec()];
    let server_config = quinn::ServerConfig::with_crypto(Arc::new(QuicServerConfig::try_from(server_crypto).unwrap()));
    let endpoint = quinn::Endpoint::server(server_config, "127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = endpoint.local_addr().unwrap();

    let root = tempfile::tempdir().unwrap();
    let server = Server::new(Box::new(FilesystemFactory::new(root.path())))
        .authenticator(Arc::new(SimpleAuthenticator::new(USER, PASS)));
    tokio::spawn(server.serve(endpoint));

    let mut roots = rustls::RootCertStore::empty();
    roots.add(cert_der).unwrap();
    let mut client_crypto = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    client_crypto.alpn_protocols = vec![b"ftp".to_vec()];
    let client_config = quinn::ClientConfig::new(Arc::new(QuicClientConfig::try_from(client_crypto).unwrap()));

    let mut client = quinn::Endpoint::client("127.0.0.1:0".parse().unwrap()).unwrap();
    client.set_default_client_config(client_config);
    let conn = client.connect(addr, "localhost").unwrap().await.unwrap();

    TestRig {
        root,
        conn,
        _client: client,
    }
}

/// One control-stream dialog from the client's point of view.
struct Control {
    send: quinn::SendStream,
    reader: BufReader<quinn::RecvStream>,
}

impl Control {
    async fn open(conn: &quinn::Connection) -> Control {
        let (send, recv) = conn.open_bi().await.unwrap();
        Control {
            send,
            reader: BufReader::new(recv),
        }
    }

    /// Opens the first control stream of a session and swallows the `220`
    /// greeting. QUIC streams only become visible to the peer once bytes
    /// flow, so a NOOP is sent to coax the greeting out.
    async fn open_first(conn: &quinn::Connection) -> Control {
        let mut control = Control::open(conn).await;
        let greeting = control.cmd("NOOP").await;
        assert!(greeting.starts_with("220 "), "expected greeting, got: {}", greeting);
        let noop_reply = control.read_reply().await;
        assert_eq!(noop_reply, "200 OK");
        control
    }

    async fn send_line(&mut self, line: &str) {
        self.send.write_all(format!("{}\r\n", line).as_bytes()).await.unwrap();
    }

    async fn read_reply(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line.trim_end().to_string()
    }

    async fn cmd(&mut self, line: &str) -> String {
        self.send_line(line).await;
        self.read_reply().await
    }

    async fn login(&mut self) {
        assert_eq!(self.cmd(&format!("USER {}", USER)).await, "331 User name ok, password required");
        assert_eq!(self.cmd(&format!("PASS {}", PASS)).await, "230 Password ok, continue");
    }
}

// The raw id of the n-th client-initiated unidirectional stream.
fn client_uni_id(stream_id: quinn::StreamId) -> u64 {
    stream_id.index() * 4 + 2
}

// The raw id of the n-th server-initiated unidirectional stream.
fn server_uni_id(stream_id: quinn::StreamId) -> u64 {
    stream_id.index() * 4 + 3
}

#[tokio::test]
async fn auth_and_navigation() {
    let rig = rig().await;
    std::fs::create_dir(rig.root.path().join("docs")).unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;
    assert_eq!(control.cmd("PWD").await, "257 \"/\" is the current directory");
    assert_eq!(control.cmd("CWD /docs").await, "250 Directory changed to /docs");
    assert_eq!(control.cmd("PWD").await, "257 \"/docs\" is the current directory");
    assert_eq!(control.cmd("CDUP").await, "250 Directory changed to /");
    assert_eq!(control.cmd("QUIT").await, "221 Goodbye");
}

#[tokio::test]
async fn bad_verb_missing_param_unauthenticated() {
    let rig = rig().await;

    let mut control = Control::open_first(&rig.conn).await;
    assert_eq!(control.cmd("FOO").await, "502 Command not found");
    assert_eq!(control.cmd("CWD").await, "553 action aborted, required param missing");
    assert_eq!(control.cmd("LIST").await, "530 not logged in");
    // The dialog survives all of that.
    assert_eq!(control.cmd("NOOP").await, "200 OK");
}

#[tokio::test]
async fn control_streams_have_independent_dialogs() {
    let rig = rig().await;

    let mut first = Control::open_first(&rig.conn).await;
    first.login().await;
    assert_eq!(first.cmd("PWD").await, "257 \"/\" is the current directory");

    // A second control stream on the same session starts unauthenticated and
    // gets no greeting.
    let mut second = Control::open(&rig.conn).await;
    assert_eq!(second.cmd("PWD").await, "530 not logged in");
    second.login().await;
    assert_eq!(second.cmd("PWD").await, "257 \"/\" is the current directory");
}

#[tokio::test]
async fn rename_is_two_phase() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("a"), b"payload").unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    assert_eq!(control.cmd("RNFR /a").await, "350 Requested file action pending further information.");
    assert_eq!(control.cmd("RNTO /b").await, "250 File renamed");
    assert!(!rig.root.path().join("a").exists());
    assert!(rig.root.path().join("b").is_file());

    // Without a fresh RNFR the staged source is gone and the driver refuses.
    let reply = control.cmd("RNTO /c").await;
    assert!(reply.starts_with("550 Action not taken: "), "got: {}", reply);
}

#[tokio::test]
async fn retr_honours_and_resets_the_restart_offset() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("file.bin"), b"0123456789").unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    assert_eq!(control.cmd("REST 4").await, "350 Start transfer from 4");

    let reply = control.cmd("RETR /file.bin").await;
    let mut stream = rig.conn.accept_uni().await.unwrap();
    assert_eq!(
        reply,
        format!("150 {} Data transfer starting 6 bytes", server_uni_id(stream.id()))
    );
    let body = stream.read_to_end(64 * 1024).await.unwrap();
    assert_eq!(body, b"456789");
    assert_eq!(control.read_reply().await, "226 Closing data stream, sent 6 bytes");

    // The offset was consumed; the next RETR starts from the beginning.
    let reply = control.cmd("RETR /file.bin").await;
    let mut stream = rig.conn.accept_uni().await.unwrap();
    assert!(reply.ends_with("Data transfer starting 10 bytes"), "got: {}", reply);
    let body = stream.read_to_end(64 * 1024).await.unwrap();
    assert_eq!(body, b"0123456789");
    assert_eq!(control.read_reply().await, "226 Closing data stream, sent 10 bytes");
}

#[tokio::test]
async fn retr_missing_file_is_one_reply() {
    let rig = rig().await;

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;
    assert_eq!(control.cmd("RETR /nope").await, "551 File not available");
    assert_eq!(control.cmd("NOOP").await, "200 OK");
}

#[tokio::test]
async fn stor_uploads_via_a_client_stream() {
    let rig = rig().await;

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    let mut upload = rig.conn.open_uni().await.unwrap();
    let stream_id = client_uni_id(upload.id());
    upload.write_all(&[b'x'; 42]).await.unwrap();
    upload.finish().unwrap();

    assert_eq!(
        control.cmd(&format!("STOR {} /up.bin", stream_id)).await,
        "150 Data transfer starting"
    );
    assert_eq!(control.read_reply().await, "226 OK, received 42 bytes");
    assert_eq!(std::fs::read(rig.root.path().join("up.bin")).unwrap(), vec![b'x'; 42]);
}

#[tokio::test]
async fn stor_append_after_appe() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("log.txt"), b"one").unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;
    assert_eq!(control.cmd("APPE").await, "202 Obsolete");

    let mut upload = rig.conn.open_uni().await.unwrap();
    let stream_id = client_uni_id(upload.id());
    upload.write_all(b" two").await.unwrap();
    upload.finish().unwrap();

    assert_eq!(
        control.cmd(&format!("STOR {} /log.txt", stream_id)).await,
        "150 Data transfer starting"
    );
    assert_eq!(control.read_reply().await, "226 OK, received 4 bytes");
    assert_eq!(std::fs::read(rig.root.path().join("log.txt")).unwrap(), b"one two");
}

#[tokio::test]
async fn stor_rejects_bad_stream_ids() {
    let rig = rig().await;

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    assert_eq!(
        control.cmd("STOR 5 /x").await,
        "501 Stream ID has not a valid value for a unidirectional stream from the client."
    );
    assert_eq!(
        control.cmd("STOR abc /x").await,
        "501 Stream ID has not a valid value for a unidirectional stream from the client."
    );
    assert_eq!(
        control.cmd("STOR onlyonepart").await,
        "501 Stream ID and path seperated by a blank needed."
    );
    // Each rejection is exactly one reply and the dialog stays usable.
    assert_eq!(control.cmd("NOOP").await, "200 OK");
}

#[tokio::test]
async fn list_and_nlst_formats() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("a.txt"), b"hello").unwrap();
    std::fs::create_dir(rig.root.path().join("sub")).unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    let reply = control.cmd("LIST").await;
    let mut stream = rig.conn.accept_uni().await.unwrap();
    assert_eq!(
        reply,
        format!(
            "150 {} Opening ASCII mode data connection for file list",
            server_uni_id(stream.id())
        )
    );
    let listing = String::from_utf8(stream.read_to_end(64 * 1024).await.unwrap()).unwrap();
    let closing = control.read_reply().await;
    assert_eq!(closing, format!("226 Closing data stream, sent {} bytes", listing.len()));

    let lines: Vec<&str> = listing.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(listing.contains(" a.txt\r\n"), "listing was: {}", listing);
    assert!(listing.contains(" sub\r\n"), "listing was: {}", listing);
    assert!(lines.iter().any(|l| l.starts_with('d')), "no directory entry: {}", listing);

    let reply = control.cmd("NLST").await;
    let mut stream = rig.conn.accept_uni().await.unwrap();
    assert!(reply.starts_with("150 "), "got: {}", reply);
    let listing = String::from_utf8(stream.read_to_end(64 * 1024).await.unwrap()).unwrap();
    control.read_reply().await;
    let mut names: Vec<&str> = listing.split("\r\n").filter(|l| !l.is_empty()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.txt", "sub"]);

    assert_eq!(control.cmd("NLST /a.txt").await, "550 /a.txt is not a directory");
}

#[tokio::test]
async fn list_of_a_single_file_and_of_nothing() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("only.txt"), b"x").unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    let reply = control.cmd("LIST /only.txt").await;
    let mut stream = rig.conn.accept_uni().await.unwrap();
    assert!(reply.starts_with("150 "), "got: {}", reply);
    let listing = stream.read_to_end(64 * 1024).await.unwrap();
    assert!(String::from_utf8(listing).unwrap().contains("only.txt"));
    control.read_reply().await;

    // A missing path produces a single 550 and nothing else.
    let reply = control.cmd("LIST /missing").await;
    assert!(reply.starts_with("550 "), "got: {}", reply);
    assert_eq!(control.cmd("NOOP").await, "200 OK");
}

#[tokio::test]
async fn file_metadata_commands() {
    let rig = rig().await;
    std::fs::write(rig.root.path().join("a.txt"), b"hello").unwrap();

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    assert_eq!(control.cmd("SIZE /a.txt").await, "213 5");
    assert_eq!(control.cmd("SIZE /missing").await, "450 path/missingnot found");

    let mdtm = control.cmd("MDTM /a.txt").await;
    let (code, stamp) = mdtm.split_once(' ').unwrap();
    assert_eq!(code, "213");
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()), "got: {}", mdtm);

    assert_eq!(control.cmd("MKD /newdir").await, "257 Directory created");
    assert!(rig.root.path().join("newdir").is_dir());
    assert_eq!(control.cmd("RMD /newdir").await, "250 Directory deleted");
    assert!(!rig.root.path().join("newdir").exists());

    assert_eq!(control.cmd("DELE /a.txt").await, "250 File deleted");
    let reply = control.cmd("DELE /a.txt").await;
    assert!(reply.starts_with("550 File delete failed: "), "got: {}", reply);
}

#[tokio::test]
async fn session_parameters_and_feat() {
    let rig = rig().await;

    let mut control = Control::open_first(&rig.conn).await;
    control.login().await;

    assert_eq!(control.cmd("SYST").await, "215 UNIX Type: L8");
    assert_eq!(control.cmd("TYPE A").await, "200 Type set to ASCII");
    assert_eq!(control.cmd("TYPE I").await, "200 Type set to binary");
    assert_eq!(control.cmd("TYPE X").await, "500 Invalid type");
    assert_eq!(control.cmd("STRU F").await, "200 OK");
    assert_eq!(control.cmd("STRU R").await, "504 STRU is an obsolete command");
    assert_eq!(control.cmd("MODE S").await, "200 OK");
    assert_eq!(control.cmd("MODE B").await, "504 MODE is an obsolete command");
    assert_eq!(control.cmd("ALLO").await, "202 Obsolete");
    assert_eq!(control.cmd("OPTS UTF8 ON").await, "200 UTF8 mode enabled");
    assert_eq!(control.cmd("OPTS UTF8 OFF").await, "550 Unsupported non-utf8 mode");
    assert_eq!(control.cmd("OPTS NONSENSE").await, "550 Unknow params");
    // Legacy alias for PWD.
    assert_eq!(control.cmd("XPWD").await, "257 \"/\" is the current directory");

    assert_eq!(control.cmd("FEAT").await, "211-Extensions supported:");
    assert_eq!(control.read_reply().await, " UTF8");
    assert_eq!(control.read_reply().await, "");
    assert_eq!(control.read_reply().await, "211 END");
}

#[tokio::test]
async fn shutdown_makes_serve_return_closed() {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());
    let mut server_crypto = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![cert.cert.der().clone()], key.into())
        .unwrap();
    server_crypto.alpn_protocols = vec![b"ftp".to_vec()];
    let server_config = quinn::ServerConfig::with_crypto(Arc::new(QuicServerConfig::try_from(server_crypto).unwrap()));
    let endpoint = quinn::Endpoint::server(server_config, "127.0.0.1:0".parse().unwrap()).unwrap();

    let root = tempfile::tempdir().unwrap();
    let server = Server::new(Box::new(FilesystemFactory::new(root.path())));
    let handle = server.shutdown_handle();
    let task = tokio::spawn(server.serve(endpoint));

    handle.shutdown();
    let result = task.await.unwrap();
    assert!(matches!(result, Err(ServerError::Closed)));
}
