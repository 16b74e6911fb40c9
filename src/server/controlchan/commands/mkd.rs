//! The RFC 959 Make Directory (`MKD`) command.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Mkd;

#[async_trait]
impl CommandHandler for Mkd {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        match sub_conn.driver.make_dir(&path).await {
            Ok(()) => sub_conn.write_message(ReplyCode::DirCreated, "Directory created").await,
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::FileError, format!("Action not taken: {}", err))
                    .await
            }
        }
    }
}
