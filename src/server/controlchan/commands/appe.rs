//! The RFC 959 Append (`APPE`) command.
//
// The historical append-with-transfer is reduced to a flag: the next STOR on
// this dialog appends to the target instead of replacing it.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Appe;

#[async_trait]
impl CommandHandler for Appe {
    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        sub_conn.append_data = true;
        sub_conn.write_message(ReplyCode::CommandOkayNotImplemented, "Obsolete").await
    }
}
