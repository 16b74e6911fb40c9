//! The RFC 959 File Structure (`STRU`) command.
//
// Like MODE and TYPE this dates back to a time when FTP was more aware of the
// content it transferred. Files are sent unmodified, so F(ile) is the only
// structure accepted.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Stru;

#[async_trait]
impl CommandHandler for Stru {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        if param.to_uppercase() == "F" {
            sub_conn.write_message(ReplyCode::CommandOkay, "OK").await
        } else {
            sub_conn
                .write_message(ReplyCode::CommandNotImplementedForParameter, "STRU is an obsolete command")
                .await
        }
    }
}
