//! The RFC 959 List (`LIST`) command.
//
// Sends a detailed listing of a directory (or a single file) down a fresh
// server-initiated unidirectional stream. The stream id is announced in the
// 150 preliminary reply so the client knows which stream to read.

use super::CommandHandler;
use crate::server::controlchan::{path, ControlChanError, ReplyCode, SubConn};
use crate::server::session::raw_stream_id;
use crate::storage::Fileinfo;
use async_trait::async_trait;

pub(crate) struct List;

#[async_trait]
impl CommandHandler for List {
    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(path::parse_list_param(param));
        let info = match sub_conn.driver.stat(&path).await {
            Ok(info) => info,
            Err(err) => return sub_conn.write_message(ReplyCode::FileError, format!("{}", err)).await,
        };
        let info = match info {
            Some(info) => info,
            None => {
                slog::info!(sub_conn.logger, "{}: no such file or directory", path);
                return sub_conn
                    .write_message(ReplyCode::FileError, format!("{}: no such file or directory", path))
                    .await;
            }
        };

        let files: Vec<Fileinfo> = if info.is_dir() {
            match sub_conn.driver.list_dir(&path).await {
                Ok(files) => files,
                Err(err) => return sub_conn.write_message(ReplyCode::FileError, format!("{}", err)).await,
            }
        } else {
            vec![Fileinfo {
                path: path.clone(),
                metadata: info,
            }]
        };

        let stream = match sub_conn.conn.get_new_send_data_stream().await {
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
                format!("{} Opening ASCII mode data connection for file list", stream_id),
            )
            .await?;

        let listing: String = files.iter().map(|f| format!("{}\r\n", f)).collect();
        sub_conn.send_data_bytes(listing.as_bytes(), stream).await
    }
}
