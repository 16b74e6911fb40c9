//! The RFC 959 Rename From (`RNFR`) command.
//
// First half of the two-phase rename; the staged source path is consumed by
// the next RNTO.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Rnfr;

#[async_trait]
impl CommandHandler for Rnfr {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        sub_conn.rename_from = Some(sub_conn.build_path(param));
        sub_conn
            .write_message(ReplyCode::FileActionPending, "Requested file action pending further information.")
            .await
    }
}
