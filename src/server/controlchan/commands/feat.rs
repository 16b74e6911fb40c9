//! The RFC 2389 Feature (`FEAT`) command.
//
// Lists the extensions this server supports. The response body is computed
// once at server start from the registry.

use super::CommandHandler;
use crate::server::controlchan::{ControlChanError, ReplyCode, SubConn};
use async_trait::async_trait;

pub(crate) struct Feat;

#[async_trait]
impl CommandHandler for Feat {
    fn require_auth(&self) -> bool {
        false
    }

    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        let feats = sub_conn.conn.server.feats.clone();
        sub_conn.write_message_multiline(ReplyCode::SystemStatus, feats).await
    }
}
