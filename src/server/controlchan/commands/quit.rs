//! The RFC 959 Logout (`QUIT`) command.
//
// Says goodbye and marks the dialog closed; the serve loop tears the control
// stream down before reading anything else.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Quit;

#[async_trait]
impl CommandHandler for Quit {
    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        sub_conn.write_message(ReplyCode::ClosingControlConnection, "Goodbye").await?;
        sub_conn.close();
        Ok(())
    }
}
