use std::fmt;

use crate::types::MessageId;

/// The fixed set of request templates the client can send.
///
/// One variant per verb; arguments are interpolated by the `Display` impl,
/// which renders the exact command line as it goes on the wire (without the
/// trailing CRLF). No other part of the crate builds command lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command<'a> {
    User(&'a str),
    Pass(&'a str),
    Auth(&'a str),
    Stat,
    List(Option<MessageId>),
    Retr(MessageId),
    Dele(MessageId),
    Noop,
    Rset,
    Top(MessageId, u32),
    Uidl(Option<MessageId>),
    Stls,
    Quit,
}

impl Command<'_> {
    /// Render for wire logging, with secrets masked.
    pub(crate) fn redacted(&self) -> String {
        match self {
            Command::Pass(_) => "PASS <redacted>".to_string(),
            cmd => cmd.to_string(),
        }
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::User(name) => write!(f, "USER {}", name),
            Command::Pass(secret) => write!(f, "PASS {}", secret),
            Command::Auth(mechanism) => write!(f, "AUTH {}", mechanism),
            Command::Stat => f.write_str("STAT"),
            Command::List(None) => f.write_str("LIST"),
            Command::List(Some(msg)) => write!(f, "LIST {}", msg),
            Command::Retr(msg) => write!(f, "RETR {}", msg),
            Command::Dele(msg) => write!(f, "DELE {}", msg),
            Command::Noop => f.write_str("NOOP"),
            Command::Rset => f.write_str("RSET"),
            Command::Top(msg, lines) => write!(f, "TOP {} {}", msg, lines),
            Command::Uidl(None) => f.write_str("UIDL"),
            Command::Uidl(Some(msg)) => write!(f, "UIDL {}", msg),
            Command::Stls => f.write_str("STLS"),
            Command::Quit => f.write_str("QUIT"),
        }
    }
}
