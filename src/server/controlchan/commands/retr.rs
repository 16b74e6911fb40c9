//! The RFC 959 Retrieve (`RETR`) command.
//
// Streams a file body down a fresh server-initiated unidirectional stream,
// honouring a restart offset staged by REST. The offset and the append flag
// are consumed on every attempt, successful or not.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use crate::server::session::raw_stream_id;
use async_trait::async_trait;

pub(crate) struct Retr;

#[async_trait]
impl CommandHandler for Retr {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        let result = transfer(sub_conn, &path).await;
        sub_conn.last_file_pos = 0;
        sub_conn.append_data = false;
        result
    }
}

async fn transfer(sub_conn: &mut SubConn, path: &str) -> Result<(), ControlChanError> {
    let (bytes, mut reader) = match sub_conn.driver.get_file(path, sub_conn.last_file_pos).await {
        Ok(pair) => pair,
        Err(_) => return sub_conn.write_message(ReplyCode::PageTypeUnknown, "File not available").await,
    };

    let mut stream = match sub_conn.conn.get_new_send_data_stream().await {
        Ok(stream) => stream,
        Err(_) => {
            return sub_conn
                .write_message(ReplyCode::CantOpenDataConnection, "Can't open data stream.")
                .await
        }
    };
    let stream_id = raw_stream_id(stream.id());
    sub_conn
        .write_message(
            ReplyCode::FileStatusOkay,
            format!("{} Data transfer starting {} bytes", stream_id, bytes),
        )
        .await?;

    // The reader is dropped on every path out of here, releasing whatever the
    // driver holds open for it.
    match tokio::io::copy(&mut reader, &mut stream).await {
        Ok(sent) => {
            let _ = stream.finish();
            sub_conn
                .write_message(
                    ReplyCode::ClosingDataConnection,
                    format!("Closing data stream, sent {} bytes", sent),
                )
                .await
        }
        Err(_) => {
            let _ = stream.finish();
            sub_conn.write_message(ReplyCode::PageTypeUnknown, "Error reading file").await
        }
    }
}
