//! The control channel: one [`SubConn`] per accepted bidirectional stream,
//! each running an independent, strictly sequential FTP command dialog.

pub(crate) mod codecs;
pub(crate) mod command;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod path;
pub(crate) mod reply;

pub(crate) use error::ControlChanError;
pub(crate) use reply::{Reply, ReplyCode};

use self::codecs::FtpCodec;
use self::command::CommandLine;
use crate::server::session::{raw_stream_id, Conn};
use crate::storage::Driver;
use futures::{SinkExt, StreamExt};
use quinn::{RecvStream, SendStream};
use slog::o;
use std::sync::Arc;
use tokio_util::codec::{FramedRead, FramedWrite};

/// The state machine bound to exactly one control stream. It owns its own
/// driver instance and all per-dialog state; nothing in here is shared with
/// other control streams on the same session.
pub(crate) struct SubConn {
    conn: Arc<Conn>,
    control_reader: FramedRead<RecvStream, FtpCodec>,
    control_writer: FramedWrite<SendStream, FtpCodec>,
    logger: slog::Logger,
    driver: Box<dyn Driver>,
    send_welcome: bool,
    // The current working directory of this dialog; always absolute.
    name_prefix: String,
    // The username received by USER, waiting for PASS.
    req_user: Option<String>,
    // The authenticated login; `None` means not authenticated.
    user: Option<String>,
    // The source path staged by RNFR for the next RNTO.
    rename_from: Option<String>,
    // The restart offset for the next transfer, set by REST.
    last_file_pos: i64,
    // Whether the next STOR appends instead of replacing.
    append_data: bool,
    closed: bool,
}

impl SubConn {
    pub(crate) fn new(conn: Arc<Conn>, driver: Box<dyn Driver>, send: SendStream, recv: RecvStream, send_welcome: bool) -> Self {
        let stream_id = raw_stream_id(send.id());
        let logger = conn
            .server
            .logger
            .new(o!("session" => format!("{}:{}", conn.session_id, stream_id)));
        SubConn {
            conn,
            control_reader: FramedRead::new(recv, FtpCodec::new()),
            control_writer: FramedWrite::new(send, FtpCodec::new()),
            logger,
            driver,
            send_welcome,
            name_prefix: "/".to_string(),
            req_user: None,
            user: None,
            rename_from: None,
            last_file_pos: 0,
            append_data: false,
            closed: false,
        }
    }

    /// Reads command lines until EOF, a fatal error or QUIT, dispatching each
    /// through the command registry. Replies are written before the next line
    /// is read, so a single dialog is strictly sequential.
    pub(crate) async fn serve(mut self) {
        if self.send_welcome {
            let greeting = self.conn.server.greeting.clone();
            if let Err(err) = self.write_message(ReplyCode::ServiceReady, greeting).await {
                slog::error!(self.logger, "greeting error: {}", err);
            }
        }
        loop {
            match self.control_reader.next().await {
                // EOF, the client is done with this dialog.
                None => break,
                Some(Err(err)) => {
                    slog::error!(self.logger, "read error: {}", err);
                    break;
                }
                Some(Ok(line)) => {
                    if let Err(err) = self.receive_line(line).await {
                        slog::error!(self.logger, "error handling command: {}", err);
                        break;
                    }
                    // QUIT closes the dialog; break before reading from the
                    // closed stream.
                    if self.closed {
                        break;
                    }
                }
            }
        }
        self.close();
        slog::info!(self.logger, "Stream Terminated");
        self.conn.report_sub_conn_finished().await;
    }

    fn is_login(&self) -> bool {
        self.user.is_some()
    }

    // Finishes the write half so the client sees a clean FIN on the control
    // stream, even if it wasn't ready for that.
    fn close(&mut self) {
        let _ = self.control_writer.get_mut().finish();
        self.closed = true;
    }

    // Dispatches a single received line: registry lookup first, then the
    // handler's predicates, then the handler itself.
    async fn receive_line(&mut self, line: CommandLine) -> Result<(), ControlChanError> {
        slog::info!(self.logger, "> {} {}", line.verb, line.param);
        let handler = match commands::lookup(&line.verb) {
            Some(handler) => handler,
            None => return self.write_message(ReplyCode::CommandNotImplemented, "Command not found").await,
        };
        if handler.require_param() && line.param.is_empty() {
            self.write_message(ReplyCode::BadFileName, "action aborted, required param missing").await
        } else if handler.require_auth() && !self.is_login() {
            self.write_message(ReplyCode::NotLoggedIn, "not logged in").await
        } else {
            handler.execute(self, &line.param).await
        }
    }

    /// Sends a single-line reply and flushes it immediately.
    async fn write_message(&mut self, code: ReplyCode, msg: impl Into<String>) -> Result<(), ControlChanError> {
        self.write_reply(Reply::new_with_string(code, msg.into())).await
    }

    /// Sends a `NNN-` ... `NNN END` multi-line reply.
    async fn write_message_multiline(&mut self, code: ReplyCode, msg: impl Into<String>) -> Result<(), ControlChanError> {
        self.write_reply(Reply::new_multiline(code, msg.into())).await
    }

    async fn write_reply(&mut self, reply: Reply) -> Result<(), ControlChanError> {
        slog::info!(self.logger, "< {} {}", reply.code() as u32, reply.message());
        self.control_writer.send(reply).await
    }

    /// Generates a safe absolute path from a client supplied filename,
    /// relative to this dialog's working directory.
    fn build_path(&self, filename: &str) -> String {
        path::build_path(&self.name_prefix, filename)
    }

    // Sends a prepared byte buffer (a directory listing) down the given data
    // stream, closes the stream and writes the closing 226 reply.
    async fn send_data_bytes(&mut self, data: &[u8], mut stream: SendStream) -> Result<(), ControlChanError> {
        let bytes = data.len();
        stream.write_all(data).await?;
        let _ = stream.finish();
        self.write_message(
            ReplyCode::ClosingDataConnection,
            format!("Closing data stream, sent {} bytes", bytes),
        )
        .await
    }
}
