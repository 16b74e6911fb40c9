//! The RFC 959 No Operation (`NOOP`) command.
//
// Essentially a ping from the client.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Noop;

#[async_trait]
impl CommandHandler for Noop {
    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        sub_conn.write_message(ReplyCode::CommandOkay, "OK").await
    }
}
