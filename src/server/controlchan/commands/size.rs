//! The RFC 3659 Size (`SIZE`) command.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Size;

#[async_trait]
impl CommandHandler for Size {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        match sub_conn.driver.stat(&path).await {
            Ok(Some(meta)) => sub_conn.write_message(ReplyCode::FileStatus, format!("{}", meta.len())).await,
            Ok(None) | Err(_) => {
                sub_conn
                    .write_message(ReplyCode::TransientFileError, format!("path{}not found", path))
                    .await
            }
        }
    }
}
