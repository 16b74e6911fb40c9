//! The RFC 959 User Name (`USER`) command.
//
// Stashes the username and asks for the password; authentication happens in
// PASS.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct User;

#[async_trait]
impl CommandHandler for User {
    fn require_param(&self) -> bool {
        true
    }

    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        sub_conn.req_user = Some(param.to_string());
        sub_conn.write_message(ReplyCode::NeedPassword, "User name ok, password required").await
    }
}
