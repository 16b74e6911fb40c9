//! The RFC 959 Password (`PASS`) command.
//
// Asks the authentication back-end whether the username stashed by USER and
// the given password are valid. A back-end failure and a clean rejection get
// different reply codes.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Pass;

#[async_trait]
impl CommandHandler for Pass {
    fn require_param(&self) -> bool {
        true
    }

    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let req_user = sub_conn.req_user.clone().unwrap_or_default();
        match sub_conn.conn.server.authenticator.check_passwd(&req_user, param).await {
            Err(_) => sub_conn.write_message(ReplyCode::FileError, "Checking password error").await,
            Ok(true) => {
                sub_conn.user = sub_conn.req_user.take();
                sub_conn.write_message(ReplyCode::UserLoggedIn, "Password ok, continue").await
            }
            Ok(false) => {
                sub_conn
                    .write_message(ReplyCode::NotLoggedIn, "Incorrect password, not logged in")
                    .await
            }
        }
    }
}
