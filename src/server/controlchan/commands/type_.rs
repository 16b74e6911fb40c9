//! The RFC 959 Representation Type (`TYPE`) command.
//
// Bytes are accepted from the client unchanged, so Image mode is what really
// happens. The RFC requires ASCII mode to be accepted, so it is; it just is
// not acted upon.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Type;

#[async_trait]
impl CommandHandler for Type {
    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        match param.to_uppercase().as_str() {
            "A" => sub_conn.write_message(ReplyCode::CommandOkay, "Type set to ASCII").await,
            "I" => sub_conn.write_message(ReplyCode::CommandOkay, "Type set to binary").await,
            _ => sub_conn.write_message(ReplyCode::CommandSyntaxError, "Invalid type").await,
        }
    }
}
