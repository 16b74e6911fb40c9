//! The RFC 959 System (`SYST`) command, answered with a canned response.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Syst;

#[async_trait]
impl CommandHandler for Syst {
    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        sub_conn.write_message(ReplyCode::SystemType, "UNIX Type: L8").await
    }
}
