//! Per-session supervision: accepts control streams, spawns their dialogs
//! and routes unidirectional data streams by id.

use crate::server::controlchan::{ControlChanError, SubConn};
use crate::server::Server;
use quinn::{Connection, RecvStream, SendStream};
use rand::Rng;
use slog::o;
use std::{collections::HashMap, fmt::Write, sync::Arc};
use tokio::sync::Mutex;

/// One accepted QUIC session. Owns the stream bookkeeping that is shared
/// between the control-stream dialogs running on it.
pub(crate) struct Conn {
    pub(crate) session: Connection,
    pub(crate) server: Arc<Server>,
    pub(crate) session_id: String,
    pub(crate) logger: slog::Logger,
    // The running dialog count, the inbound data stream cache and outbound
    // stream opening all share this one lock.
    shared: Mutex<SharedStreams>,
}

struct SharedStreams {
    running_sub_conns: usize,
    data_receive_streams: HashMap<u64, RecvStream>,
}

impl Conn {
    pub(crate) fn new(server: Arc<Server>, session: Connection) -> Conn {
        let session_id = new_session_id();
        let logger = server.logger.new(o!("session" => session_id.clone()));
        Conn {
            session,
            server,
            session_id,
            logger,
            shared: Mutex::new(SharedStreams {
                running_sub_conns: 0,
                data_receive_streams: HashMap::new(),
            }),
        }
    }

    /// Accepts control streams until the session goes away, giving each its
    /// own driver instance and its own task. The `220` greeting goes out on
    /// the first control stream only.
    pub(crate) async fn serve(self: Arc<Self>) {
        slog::info!(self.logger, "Connection Established");
        let mut first_control_stream = true;
        loop {
            // One fresh driver per dialog, not per session.
            let driver = match self.server.driver_factory.new_driver() {
                Ok(driver) => driver,
                Err(err) => {
                    slog::error!(self.logger, "Error creating driver, closing session: {}", err);
                    break;
                }
            };
            let (send, recv) = match self.session.accept_bi().await {
                Ok(halves) => halves,
                Err(err) => {
                    if !is_graceful_close(&err) {
                        slog::error!(self.logger, "error accepting control stream: {}", err);
                    }
                    break;
                }
            };
            {
                self.shared.lock().await.running_sub_conns += 1;
            }
            let sub_conn = SubConn::new(Arc::clone(&self), driver, send, recv, first_control_stream);
            first_control_stream = false;
            tokio::spawn(sub_conn.serve());
        }
        self.session.close(0u32.into(), b"");
    }

    /// Called by every dialog when it finishes. When the last one reports in,
    /// the session is closed.
    pub(crate) async fn report_sub_conn_finished(&self) {
        let mut shared = self.shared.lock().await;
        shared.running_sub_conns -= 1;
        if shared.running_sub_conns == 0 {
            self.session.close(0u32.into(), b"");
            slog::info!(self.logger, "Connection Terminated");
        }
    }

    /// Opens a fresh server-initiated unidirectional stream for RETR/LIST/
    /// NLST output.
    pub(crate) async fn get_new_send_data_stream(&self) -> Result<SendStream, ControlChanError> {
        let _shared = self.shared.lock().await;
        let stream = self.session.open_uni().await?;
        Ok(stream)
    }

    /// Hands out the client-initiated unidirectional stream with the given
    /// id, accepting (and caching) intervening inbound streams. Stream ids
    /// arrive monotonically, so once a higher id has been accepted the wanted
    /// one can never appear and the request fails.
    pub(crate) async fn get_receive_data_stream(&self, wanted_id: u64) -> Result<RecvStream, ControlChanError> {
        let mut shared = self.shared.lock().await;
        if let Some(stream) = shared.data_receive_streams.remove(&wanted_id) {
            return Ok(stream);
        }
        loop {
            let stream = self.session.accept_uni().await?;
            let stream_id = raw_stream_id(stream.id());
            if stream_id == wanted_id {
                return Ok(stream);
            }
            shared.data_receive_streams.insert(stream_id, stream);
            if stream_id > wanted_id {
                return Err(ControlChanError::StreamOrdering);
            }
        }
    }
}

/// The numeric value of a stream id as it appears in the protocol. QUIC
/// encodes the direction in bit 1 and the initiator in bit 0, which is why
/// client-initiated unidirectional streams satisfy `id % 4 == 2`.
pub(crate) fn raw_stream_id(id: quinn::StreamId) -> u64 {
    let initiator = match id.initiator() {
        quinn::Side::Client => 0,
        quinn::Side::Server => 1,
    };
    let dir = match id.dir() {
        quinn::Dir::Bi => 0,
        quinn::Dir::Uni => 2,
    };
    id.index() * 4 + dir + initiator
}

fn is_graceful_close(err: &quinn::ConnectionError) -> bool {
    matches!(
        err,
        quinn::ConnectionError::ApplicationClosed(_) | quinn::ConnectionError::LocallyClosed
    )
}

// Returns a random 20 char hex string used as the unique session id in logs.
fn new_session_id() -> String {
    let bytes: [u8; 10] = rand::thread_rng().gen();
    bytes.iter().fold(String::with_capacity(20), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

#[cfg(test)]
mod tests {
    use super::new_session_id;

    #[test]
    fn session_ids_are_20_hex_chars() {
        let id = new_session_id();
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_ids_are_unique_enough() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
