//! The RFC 959 Rename To (`RNTO`) command.
//
// Second half of the two-phase rename. The staged source is cleared whether
// the driver succeeds or not, so a stray RNTO without a fresh RNFR hands the
// driver an empty source and fails there.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Rnto;

#[async_trait]
impl CommandHandler for Rnto {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let to_path = sub_conn.build_path(param);
        let from_path = sub_conn.rename_from.take().unwrap_or_default();
        match sub_conn.driver.rename(&from_path, &to_path).await {
            Ok(()) => sub_conn.write_message(ReplyCode::FileActionOkay, "File renamed").await,
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::FileError, format!("Action not taken: {}", err))
                    .await
            }
        }
    }
}
