//! The RFC 959 Remove Directory (`RMD`) command.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Rmd;

#[async_trait]
impl CommandHandler for Rmd {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        match sub_conn.driver.delete_dir(&path).await {
            Ok(()) => sub_conn.write_message(ReplyCode::FileActionOkay, "Directory deleted").await,
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::FileError, format!("Directory delete failed: {}", err))
                    .await
            }
        }
    }
}
