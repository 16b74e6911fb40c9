//! The reply types written back to the client on the control stream.

/// A reply to the FTP client.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A single-line reply: `<code> <message>\r\n`.
    CodeAndMsg {
        /// The numeric reply code.
        code: ReplyCode,
        /// The text after the code.
        msg: String,
    },
    /// A multi-line reply: `<code>-<message>\r\n<code> END\r\n`. The message
    /// may contain embedded newlines.
    MultiLine {
        /// The numeric reply code.
        code: ReplyCode,
        /// The text between the opening and closing code lines.
        msg: String,
    },
}

/// The subset of RFC 959 reply codes spoken by this server.
//
// The three digits form a code. Codes between 100 and 199 indicate marks;
// codes between 200 and 399 indicate acceptance; codes between 400 and 599
// indicate rejection. Clients are well advised not to look past the first
// digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ReplyCode {
    /// 150 File status okay; about to open data connection.
    FileStatusOkay = 150,

    /// 200 Command okay.
    CommandOkay = 200,
    /// 202 Command not implemented, superfluous at this site.
    CommandOkayNotImplemented = 202,
    /// 211 System status, or system help reply.
    SystemStatus = 211,
    /// 213 File status.
    FileStatus = 213,
    /// 215 NAME system type.
    SystemType = 215,
    /// 220 Service ready for new user.
    ServiceReady = 220,
    /// 221 Service closing control connection.
    ClosingControlConnection = 221,
    /// 226 Closing data connection; requested file action successful.
    ClosingDataConnection = 226,
    /// 230 User logged in, proceed.
    UserLoggedIn = 230,
    /// 250 Requested file action okay, completed.
    FileActionOkay = 250,
    /// 257 "PATHNAME" created (also used for PWD).
    DirCreated = 257,

    /// 331 User name okay, need password.
    NeedPassword = 331,
    /// 350 Requested file action pending further information.
    FileActionPending = 350,

    /// 425 Can't open data connection.
    CantOpenDataConnection = 425,
    /// 450 Requested file action not taken; file unavailable.
    TransientFileError = 450,

    /// 500 Syntax error, command unrecognized.
    CommandSyntaxError = 500,
    /// 501 Syntax error in parameters or arguments.
    ParameterSyntaxError = 501,
    /// 502 Command not implemented.
    CommandNotImplemented = 502,
    /// 504 Command not implemented for that parameter.
    CommandNotImplementedForParameter = 504,
    /// 530 Not logged in.
    NotLoggedIn = 530,
    /// 550 Requested action not taken; file unavailable.
    FileError = 550,
    /// 551 Requested action aborted; page type unknown.
    PageTypeUnknown = 551,
    /// 553 Requested action not taken; file name not allowed.
    BadFileName = 553,
}

impl Reply {
    /// A single line reply.
    pub fn new_with_string(code: ReplyCode, msg: String) -> Self {
        Reply::CodeAndMsg { code, msg }
    }

    /// A multi-line reply, terminated by a `<code> END` line on the wire.
    pub fn new_multiline(code: ReplyCode, msg: String) -> Self {
        Reply::MultiLine { code, msg }
    }

    /// The numeric code of this reply.
    pub fn code(&self) -> ReplyCode {
        match self {
            Reply::CodeAndMsg { code, .. } => *code,
            Reply::MultiLine { code, .. } => *code,
        }
    }

    /// The message text of this reply.
    pub fn message(&self) -> &str {
        match self {
            Reply::CodeAndMsg { msg, .. } => msg,
            Reply::MultiLine { msg, .. } => msg,
        }
    }
}
