//! The static registry mapping FTP verbs to their handlers.
//!
//! Handlers are stateless unit values; all dialog state lives on the
//! [`SubConn`] they are handed. The three predicates mirror the classic
//! dispatch rules: `require_param` rejects an empty parameter with `553`,
//! `require_auth` rejects unauthenticated dialogs with `530`, and
//! `is_extend` marks verbs that should be advertised by FEAT.

mod allo;
mod appe;
mod cdup;
mod cwd;
mod dele;
mod feat;
mod list;
mod mdtm;
mod mkd;
mod mode;
mod nlst;
mod noop;
mod opts;
mod pass;
mod pwd;
mod quit;
mod rest;
mod retr;
mod rmd;
mod rnfr;
mod rnto;
mod size;
mod stor;
mod stru;
mod syst;
mod type_;
mod user;

use super::{error::ControlChanError, SubConn};
use async_trait::async_trait;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Common interface for all command handlers.
#[async_trait]
pub(crate) trait CommandHandler: Send + Sync {
    /// Whether this verb is advertised as an extension by FEAT.
    fn is_extend(&self) -> bool {
        false
    }

    /// Whether dispatch must reject an empty parameter before calling
    /// `execute`.
    fn require_param(&self) -> bool {
        false
    }

    /// Whether dispatch must reject unauthenticated dialogs before calling
    /// `execute`.
    fn require_auth(&self) -> bool {
        true
    }

    /// Runs the command. `param` is the trimmed parameter, guaranteed
    /// non-empty when `require_param` returns true.
    async fn execute(&self, sub_conn: &mut SubConn, param: &str) -> Result<(), ControlChanError>;
}

lazy_static! {
    static ref COMMANDS: HashMap<&'static str, &'static dyn CommandHandler> = {
        let mut m: HashMap<&'static str, &'static dyn CommandHandler> = HashMap::new();
        m.insert("ALLO", &allo::Allo);
        m.insert("APPE", &appe::Appe);
        m.insert("CDUP", &cdup::Cdup);
        m.insert("CWD", &cwd::Cwd);
        m.insert("DELE", &dele::Dele);
        m.insert("FEAT", &feat::Feat);
        m.insert("LIST", &list::List);
        m.insert("NLST", &nlst::Nlst);
        m.insert("MDTM", &mdtm::Mdtm);
        m.insert("MKD", &mkd::Mkd);
        m.insert("MODE", &mode::Mode);
        m.insert("NOOP", &noop::Noop);
        m.insert("OPTS", &opts::Opts);
        m.insert("PASS", &pass::Pass);
        m.insert("PWD", &pwd::Pwd);
        m.insert("QUIT", &quit::Quit);
        m.insert("RETR", &retr::Retr);
        m.insert("REST", &rest::Rest);
        m.insert("RNFR", &rnfr::Rnfr);
        m.insert("RNTO", &rnto::Rnto);
        m.insert("RMD", &rmd::Rmd);
        m.insert("SIZE", &size::Size);
        m.insert("STOR", &stor::Stor);
        m.insert("STRU", &stru::Stru);
        m.insert("SYST", &syst::Syst);
        m.insert("TYPE", &type_::Type);
        m.insert("USER", &user::User);
        // Pre RFC 959 aliases, kept for old clients.
        m.insert("XCUP", &cdup::Cdup);
        m.insert("XCWD", &cwd::Cwd);
        m.insert("XPWD", &pwd::Pwd);
        m.insert("XRMD", &rmd::Rmd);
        m
    };
}

/// Looks up the handler for a verb; matching is case-insensitive.
pub(crate) fn lookup(verb: &str) -> Option<&'static dyn CommandHandler> {
    COMMANDS.get(verb.to_uppercase().as_str()).copied()
}

/// The FEAT response body, computed once at server start: UTF8 plus every
/// registered verb marked as an extension.
pub(crate) fn feature_text() -> String {
    let mut feat_cmds = String::from(" UTF8\n");
    let mut extends: Vec<&&str> = COMMANDS.iter().filter(|(_, h)| h.is_extend()).map(|(v, _)| v).collect();
    extends.sort();
    for verb in extends {
        feat_cmds.push_str(&format!(" {}\n", verb));
    }
    format!("Extensions supported:\n{}", feat_cmds)
}
