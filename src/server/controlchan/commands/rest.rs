//! The RFC 3659 Restart (`REST`) command.
//
// Stages a byte offset for the next transfer on this dialog. The offset is
// consumed (and reset) by the next RETR, whether it succeeds or not.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Rest;

#[async_trait]
impl CommandHandler for Rest {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        match param.parse::<i64>() {
            Err(_) => sub_conn.write_message(ReplyCode::PageTypeUnknown, "File not available").await,
            Ok(pos) => {
                sub_conn.last_file_pos = pos;
                sub_conn.append_data = true;
                sub_conn
                    .write_message(ReplyCode::FileActionPending, format!("Start transfer from {}", pos))
                    .await
            }
        }
    }
}
