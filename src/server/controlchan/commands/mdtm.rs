//! The RFC 3659 Modification Time (`MDTM`) command.
//
// Reports the last modified time of a file as YYYYMMDDhhmmss in UTC.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;
use chrono::prelude::{DateTime, Utc};

pub(crate) struct Mdtm;

#[async_trait]
impl CommandHandler for Mdtm {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        let modified = match sub_conn.driver.stat(&path).await {
            Ok(Some(meta)) => meta.modified().ok(),
            _ => None,
        };
        match modified {
            Some(modified) => {
                let stamp = DateTime::<Utc>::from(modified).format("%Y%m%d%H%M%S").to_string();
                sub_conn.write_message(ReplyCode::FileStatus, stamp).await
            }
            None => sub_conn.write_message(ReplyCode::TransientFileError, "File not available").await,
        }
    }
}
