//! The RFC 959 Store (`STOR`) command.
//
// The client opens a unidirectional stream itself and names its id as the
// first token of the parameter; the session router hands the matching stream
// to this handler once it has been accepted.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Stor;

#[async_trait]
impl CommandHandler for Stor {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let (stream_token, path_param) = match param.split_once(' ') {
            Some(parts) => parts,
            None => {
                return sub_conn
                    .write_message(ReplyCode::ParameterSyntaxError, "Stream ID and path seperated by a blank needed.")
                    .await
            }
        };
        let stream_id = match parse_stream_id(stream_token) {
            Some(id) => id,
            None => {
                return sub_conn
                    .write_message(
                        ReplyCode::ParameterSyntaxError,
                        "Stream ID has not a valid value for a unidirectional stream from the client.",
                    )
                    .await
            }
        };

        sub_conn.write_message(ReplyCode::FileStatusOkay, "Data transfer starting").await?;
        let mut stream = match sub_conn.conn.get_receive_data_stream(stream_id).await {
            Ok(stream) => stream,
            Err(_) => {
                return sub_conn
                    .write_message(ReplyCode::CantOpenDataConnection, "Can't open data stream.")
                    .await
            }
        };

        let target_path = sub_conn.build_path(path_param);
        let append = sub_conn.append_data;
        let result = sub_conn.driver.put_file(&target_path, &mut stream, append).await;
        sub_conn.append_data = false;

        match result {
            Ok(bytes) => {
                sub_conn
                    .write_message(ReplyCode::ClosingDataConnection, format!("OK, received {} bytes", bytes))
                    .await
            }
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::TransientFileError, format!("error during transfer: {}", err))
                    .await
            }
        }
    }
}

// A stream id offered for STOR must parse as a non-negative integer and
// satisfy id % 4 == 2, the QUIC encoding of "client-initiated,
// unidirectional".
fn parse_stream_id(token: &str) -> Option<u64> {
    let id: i64 = token.parse().ok()?;
    if id < 0 || id % 4 != 2 {
        return None;
    }
    Some(id as u64)
}
