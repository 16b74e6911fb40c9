//! The RFC 959 Change Working Directory (`CWD`) command.
//
// Changes the dialog's working directory without altering its login. The
// directory only becomes current once the driver confirms it exists.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Cwd;

#[async_trait]
impl CommandHandler for Cwd {
    fn require_param(&self) -> bool {
        true
    }

    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError> {
        let path = sub_conn.build_path(param);
        match sub_conn.driver.change_dir(&path).await {
            Ok(()) => {
                sub_conn.name_prefix = path.clone();
                sub_conn
                    .write_message(ReplyCode::FileActionOkay, format!("Directory changed to {}", path))
                    .await
            }
            Err(err) => {
                sub_conn
                    .write_message(ReplyCode::FileError, format!("Directory change to {} failed: {}", path, err))
                    .await
            }
        }
    }
}
