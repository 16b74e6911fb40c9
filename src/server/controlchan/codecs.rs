//! The tokio codec that frames the control stream: CRLF-terminated command
//! lines in, formatted replies out.

use super::{command::CommandLine, error::ControlChanError, Reply};

use bytes::BytesMut;
use std::io::Write;
use std::str;
use tokio_util::codec::{Decoder, Encoder};

// FtpCodec implements tokio's `Decoder` and `Encoder` traits for the control
// stream, that we'll use to decode FTP commands and encode their responses.
pub struct FtpCodec {
    // Stored index of the next index to examine for a '\n' character. This is
    // used to optimize searching: if `decode` was called with `abc` it holds
    // 3, so that the next call with `abcde\n` only looks at `de\n`.
    next_index: usize,
}

impl FtpCodec {
    pub fn new() -> Self {
        FtpCodec { next_index: 0 }
    }
}

impl Decoder for FtpCodec {
    type Item = CommandLine;
    type Error = ControlChanError;

    // Decode the incoming bytes into a command line. We split on newlines and
    // parse the resulting line with `CommandLine::parse`.
    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<CommandLine>, Self::Error> {
        if let Some(newline_offset) = buf[self.next_index..].iter().position(|b| *b == b'\n') {
            let newline_index = newline_offset + self.next_index;
            let line = buf.split_to(newline_index + 1);
            self.next_index = 0;
            Ok(Some(CommandLine::parse(str::from_utf8(&line)?)))
        } else {
            self.next_index = buf.len();
            Ok(None)
        }
    }
}

impl Encoder<Reply> for FtpCodec {
    type Error = ControlChanError;

    // Encode the outgoing reply. Single line replies are `NNN text\r\n`,
    // multi-line replies are wrapped in `NNN-` ... `NNN END` the way the
    // FEAT response expects.
    fn encode(&mut self, reply: Reply, buf: &mut BytesMut) -> Result<(), Self::Error> {
        let mut buffer = vec![];
        match reply {
            Reply::CodeAndMsg { code, msg } => write!(buffer, "{} {}\r\n", code as u32, msg)?,
            Reply::MultiLine { code, msg } => write!(buffer, "{}-{}\r\n{} END\r\n", code as u32, msg, code as u32)?,
        }
        buf.extend(&buffer);
        Ok(())
    }
}
