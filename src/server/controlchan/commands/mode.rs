//! The RFC 959 Transfer Mode (`MODE`) command.
//
// The original FTP spec had various options for how data would be sent over
// the data socket. These days (S)tream mode is all that is used: data is just
// streamed down unchanged.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Mode;

#[async_trait]
impl CommandHandler for Mode {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        if param.to_uppercase() == "S" {
            sub_conn.write_message(ReplyCode::CommandOkay, "OK").await
        } else {
            sub_conn
                .write_message(ReplyCode::CommandNotImplementedForParameter, "MODE is an obsolete command")
                .await
        }
    }
}
