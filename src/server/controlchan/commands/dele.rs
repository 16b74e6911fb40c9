//! The RFC 959 Delete (`DELE`) command.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Dele;

#[async_trait]
impl CommandHandler for Dele {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        match sub_conn.driver.delete_file(&path).await {
            Ok(()) => sub_conn.write_message(ReplyCode::FileActionOkay, "File deleted").await,
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::FileError, format!("File delete failed: {}", err))
                    .await
            }
        }
    }
}
