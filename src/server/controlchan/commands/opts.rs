//! The RFC 2389 Options (`OPTS`) command.
//
// Only `OPTS UTF8 ON` is meaningful here; UTF8 is the sole mode this server
// speaks, so switching it off is refused.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Opts;

#[async_trait]
impl CommandHandler for Opts {
    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let parts: Vec<&str> = param.split_whitespace().collect();
        if parts.len() != 2 || parts[0].to_uppercase() != "UTF8" {
            return sub_conn.write_message(ReplyCode::FileError, "Unknow params").await;
        }
        if parts[1].to_uppercase() == "ON" {
            sub_conn.write_message(ReplyCode::CommandOkay, "UTF8 mode enabled").await
        } else {
            sub_conn.write_message(ReplyCode::FileError, "Unsupported non-utf8 mode").await
        }
    }
}
