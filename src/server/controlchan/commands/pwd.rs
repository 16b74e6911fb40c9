//! The RFC 959 Print Working Directory (`PWD`) command.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Pwd;

#[async_trait]
impl CommandHandler for Pwd {
    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        let msg = format!("\"{}\" is the current directory", sub_conn.name_prefix);
        sub_conn.write_message(ReplyCode::DirCreated, msg).await
    }
}
