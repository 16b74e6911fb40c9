//! The RFC 959 Name List (`NLST`) command.
//
// Like LIST, but strictly for directories and with one bare name per line.

use super::CommandHandler;
use crate::server::controlchan::{path, ControlChanError, ReplyCode, SubConn};
use crate::server::session::raw_stream_id;
use async_trait::async_trait;

pub(crate) struct Nlst;

#[async_trait]
impl CommandHandler for Nlst {
    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(path::parse_list_param(param));
        let info = match sub_conn.driver.stat(&path).await {
            Ok(info) => info,
            Err(err) => return sub_conn.write_message(ReplyCode::FileError, format!("{}", err)).await,
        };
        let is_dir = match info {
            Some(info) => info.is_dir(),
            None => {
                slog::info!(sub_conn.logger, "{}: no such file or directory", path);
                return sub_conn
                    .write_message(ReplyCode::FileError, format!("{}: no such file or directory", path))
                    .await;
            }
        };
        if !is_dir {
            return sub_conn
                .write_message(ReplyCode::FileError, format!("{} is not a directory", param))
                .await;
        }

        let files = match sub_conn.driver.list_dir(&path).await {
            Ok(files) => files,
            Err(err) => return sub_conn.write_message(ReplyCode::FileError, format!("{}", err)).await,
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

        let listing: String = files.iter().map(|f| format!("{}\r\n", f.name())).collect();
        sub_conn.send_data_bytes(listing.as_bytes(), stream).await
    }
}
