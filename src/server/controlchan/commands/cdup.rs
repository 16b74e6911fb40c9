//! The RFC 959 Change To Parent Directory (`CDUP`) command.
//
// Equivalent to CWD with ".." as the argument.

use super::{cwd::Cwd, CommandHandler};
use crate::server::controlchan::{ControlChanError, SubConn};
use async_trait::async_trait;

pub(crate) struct Cdup;

#[async_trait]
impl CommandHandler for Cdup {
    async fn execute(&self, sub_conn: &mut SubConn, _param: &str) -> Result<(), ControlChanError> {
        Cwd.execute(sub_conn, "..").await
    }
}
