//! The RFC 959 Allocate (`ALLO`) command.
//
// Nothing is ever pre-allocated here, so the command is acknowledged as
// obsolete.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Allo;

#[async_trait]
impl CommandHandler for Allo {
    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        sub_conn.write_message(ReplyCode::CommandOkayNotImplemented, "Obsolete").await
    }
}
