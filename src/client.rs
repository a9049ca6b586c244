use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::ops::{Deref, DerefMut};
use std::result;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bufstream::BufStream;
#[cfg(feature = "native-tls")]
use native_tls::{TlsConnector, TlsStream};

use crate::authenticator::Authenticator;
use crate::command::Command;
use crate::decoder::MessageDecoder;
use crate::error::{Error, ParseError, Result, ValidateError};
use crate::parse::{parse_list_entry, parse_stat, parse_status, parse_uidl_entry};
use crate::types::{MessageId, MessageInfo, Stat, Uidl};

const CR: u8 = 0x0d;
const LF: u8 = 0x0a;

fn validate_str(value: &str) -> Result<&str> {
    if let Some(c) = value.chars().find(|&c| c == '\r' || c == '\n') {
        return Err(Error::Validate(ValidateError(c)));
    }
    Ok(value)
}

/// Strip one trailing line terminator (CRLF, or a bare LF) from `line`.
fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// The buffered stream underlying a [`Client`] or [`Session`], together with
/// the line-framing, reply-classification, and body-draining primitives both
/// states share.
///
/// The protocol is strictly synchronous: one command on the wire, then one
/// reply (and one body, where the verb calls for it). The connection keeps no
/// other state.
#[derive(Debug)]
pub struct Connection<T: Read + Write> {
    stream: BufStream<T>,
    /// Echo the wire exchange to stderr for debugging.
    pub debug: bool,
}

impl<T: Read + Write> Connection<T> {
    fn new(stream: T) -> Connection<T> {
        Connection {
            stream: BufStream::new(stream),
            debug: false,
        }
    }

    /// Read one line, including its terminator, appending onto `into`.
    ///
    /// A read of zero bytes means the peer closed the stream in an orderly
    /// fashion; that surfaces as [`Error::ConnectionLost`], distinct from the
    /// [`Error::Io`] a failing transport produces.
    fn readline(&mut self, into: &mut Vec<u8>) -> Result<usize> {
        use std::io::BufRead;
        let read = self.stream.read_until(LF, into)?;
        if read == 0 {
            return Err(Error::ConnectionLost);
        }

        let line = trim_terminator(&into[into.len() - read..]);
        if self.debug {
            eprintln!("S: {}", String::from_utf8_lossy(line));
        }
        log::trace!("S: {}", String::from_utf8_lossy(line));

        Ok(read)
    }

    /// Read one line as UTF-8 text with the terminator stripped.
    fn read_line(&mut self) -> Result<String> {
        let mut v = Vec::new();
        self.readline(&mut v)?;
        Ok(String::from_utf8(trim_terminator(&v).to_vec())?)
    }

    fn write_line(&mut self, buf: &[u8]) -> Result<()> {
        self.stream.write_all(buf)?;
        self.stream.write_all(&[CR, LF])?;
        self.stream.flush()?;
        if self.debug {
            eprintln!("C: {}", String::from_utf8_lossy(buf));
        }
        log::trace!("C: {}", String::from_utf8_lossy(buf));
        Ok(())
    }

    /// Send one command line and flush.
    fn send(&mut self, cmd: &Command<'_>) -> Result<()> {
        self.stream.write_all(cmd.to_string().as_bytes())?;
        self.stream.write_all(&[CR, LF])?;
        self.stream.flush()?;
        if self.debug {
            eprintln!("C: {}", cmd.redacted());
        }
        log::trace!("C: {}", cmd.redacted());
        Ok(())
    }

    /// Send one command and read exactly one reply line.
    ///
    /// Returns the text following `+OK`; a `-ERR` reply becomes
    /// [`Error::ErrResponse`] with the server's reason text, before any field
    /// of the reply is looked at.
    fn command(&mut self, cmd: &Command<'_>) -> Result<String> {
        self.send(cmd)?;
        let line = self.read_line()?;
        parse_status(&line)
    }

    fn read_greeting(&mut self) -> Result<String> {
        let line = self.read_line()?;
        parse_status(&line).map_err(|_| Error::Greeting(line))
    }

    /// Drain a multi-line body as UTF-8 lines.
    ///
    /// Stops at, and excludes, the lone-dot sentinel; a byte-stuffed leading
    /// dot on any other line is removed. Errors from [`Self::readline`]
    /// propagate unchanged.
    fn read_body_lines(&mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = self.read_line()?;
            if line == "." {
                return Ok(lines);
            }
            if line.starts_with('.') {
                line.remove(0);
            }
            lines.push(line);
        }
    }

    /// Drain a multi-line body byte-exactly, reassembling CRLF-terminated
    /// message octets. Sentinel handling matches [`Self::read_body_lines`].
    fn read_body_raw(&mut self) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            self.readline(&mut line)?;
            let content = trim_terminator(&line);
            if content == b"." {
                return Ok(body);
            }
            let content = match content.first() {
                Some(b'.') => &content[1..],
                _ => content,
            };
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
    }

    /// Send `QUIT` without awaiting a reply.
    ///
    /// Real servers tear the connection down as soon as they process `QUIT`,
    /// so the reply is deliberately not read; dropping the connection closes
    /// our end.
    fn quit(&mut self) -> Result<()> {
        self.send(&Command::Quit)
    }
}

/// An unauthenticated POP3 connection, in the AUTHORIZATION state of the
/// protocol.
///
/// Obtained from [`Client::connect`] or a
/// [`ClientBuilder`](crate::ClientBuilder); consumed by [`Client::login`] or
/// [`Client::authenticate`], which yield a [`Session`] in the TRANSACTION
/// state.
#[derive(Debug)]
pub struct Client<T: Read + Write> {
    conn: Connection<T>,
}

/// An authenticated POP3 connection, in the TRANSACTION state of the
/// protocol.
///
/// All maildrop access happens through this type. Messages deleted with
/// [`Session::dele`] are only removed once [`Session::quit`] ends the session;
/// until then [`Session::rset`] reverses the marks.
#[derive(Debug)]
pub struct Session<T: Read + Write> {
    conn: Connection<T>,
}

impl<T: Read + Write> Deref for Client<T> {
    type Target = Connection<T>;

    fn deref(&self) -> &Connection<T> {
        &self.conn
    }
}

impl<T: Read + Write> DerefMut for Client<T> {
    fn deref_mut(&mut self) -> &mut Connection<T> {
        &mut self.conn
    }
}

impl<T: Read + Write> Deref for Session<T> {
    type Target = Connection<T>;

    fn deref(&self) -> &Connection<T> {
        &self.conn
    }
}

impl<T: Read + Write> DerefMut for Session<T> {
    fn deref_mut(&mut self) -> &mut Connection<T> {
        &mut self.conn
    }
}

impl Client<TcpStream> {
    /// Connect over plain TCP and validate the server greeting.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Client<TcpStream>> {
        let stream = TcpStream::connect(addr)?;
        let mut client = Client::new(stream);
        client.read_greeting()?;
        Ok(client)
    }

    /// Upgrade a plain connection to TLS with `STLS` (RFC 2595).
    ///
    /// Use the `domain` parameter for the TLS library's SNI and hostname
    /// verification.
    #[cfg(feature = "native-tls")]
    pub fn stls(
        self,
        domain: &str,
        ssl_connector: &TlsConnector,
    ) -> Result<Client<TlsStream<TcpStream>>> {
        let tcp = self.stls_inner()?;
        Ok(Client::new(ssl_connector.connect(domain, tcp)?))
    }
}

#[cfg(feature = "native-tls")]
impl Client<TlsStream<TcpStream>> {
    /// Connect with implicit TLS (usually port 995) and validate the server
    /// greeting.
    pub fn secure_connect<A: ToSocketAddrs>(
        addr: A,
        domain: &str,
        ssl_connector: &TlsConnector,
    ) -> Result<Client<TlsStream<TcpStream>>> {
        let stream = TcpStream::connect(addr)?;
        let tls = ssl_connector.connect(domain, stream)?;
        let mut client = Client::new(tls);
        client.read_greeting()?;
        Ok(client)
    }
}

impl<T: Read + Write> Client<T> {
    /// Creates a new client over the given stream.
    ///
    /// The greeting is not consumed; callers bringing their own stream should
    /// follow up with [`Client::read_greeting`].
    pub fn new(stream: T) -> Client<T> {
        Client {
            conn: Connection::new(stream),
        }
    }

    /// Read and validate the server's one-line greeting.
    ///
    /// Exactly one line is consumed. Anything but a positive reply fails with
    /// [`Error::Greeting`] and the connection should be discarded; there is
    /// no retry.
    pub fn read_greeting(&mut self) -> Result<String> {
        self.conn.read_greeting()
    }

    /// Authenticate with `USER` and `PASS`.
    ///
    /// Some servers accept both lines and only reveal bad credentials once
    /// the first transaction command arrives, so a `NOOP` probe is issued
    /// last; its rejection is reported as the login failure.
    ///
    /// On failure the client is returned alongside the error, as the
    /// connection may still be usable.
    pub fn login(
        mut self,
        username: &str,
        password: &str,
    ) -> result::Result<Session<T>, (Error, Client<T>)> {
        match self.try_login(username, password) {
            Ok(()) => Ok(Session { conn: self.conn }),
            Err(e) => Err((e, self)),
        }
    }

    fn try_login(&mut self, username: &str, password: &str) -> Result<()> {
        self.conn.command(&Command::User(validate_str(username)?))?;
        self.conn.command(&Command::Pass(validate_str(password)?))?;
        self.conn.command(&Command::Noop)?;
        Ok(())
    }

    /// Authenticate with a SASL mechanism via `AUTH` (RFC 5034).
    ///
    /// Each base64 continuation challenge from the server is decoded and fed
    /// to the [`Authenticator`]; its response is base64-encoded and sent
    /// back, until the server concludes with a status reply.
    pub fn authenticate<A: Authenticator>(
        mut self,
        auth_type: &str,
        authenticator: &A,
    ) -> result::Result<Session<T>, (Error, Client<T>)> {
        match self.do_auth_handshake(auth_type, authenticator) {
            Ok(()) => Ok(Session { conn: self.conn }),
            Err(e) => Err((e, self)),
        }
    }

    fn do_auth_handshake<A: Authenticator>(
        &mut self,
        auth_type: &str,
        authenticator: &A,
    ) -> Result<()> {
        self.conn.send(&Command::Auth(validate_str(auth_type)?))?;
        loop {
            let line = self.conn.read_line()?;
            let challenge = match line.strip_prefix('+') {
                // "+ <challenge>" or a bare "+" continuation
                Some(rest) if rest.is_empty() => "",
                Some(rest) if rest.starts_with(' ') => &rest[1..],
                _ => {
                    parse_status(&line)?;
                    return Ok(());
                }
            };
            let decoded = BASE64
                .decode(challenge)
                .map_err(|_| ParseError::Authentication(line.to_string()))?;
            let response = authenticator.process(&decoded);
            self.conn.write_line(BASE64.encode(response).as_bytes())?;
        }
    }

    /// Terminate the connection without authenticating.
    pub fn quit(mut self) -> Result<()> {
        self.conn.quit()
    }

    /// Send `STLS`, check the reply, and hand back the raw stream for the
    /// TLS handshake.
    pub(crate) fn stls_inner(mut self) -> Result<T> {
        self.conn.command(&Command::Stls)?;
        Ok(self.conn.stream.into_inner()?)
    }
}

impl<T: Read + Write> Session<T> {
    /// Request the drop listing for the maildrop: message count and total
    /// size in octets.
    ///
    /// The server recomputes this on every call; nothing is cached.
    pub fn stat(&mut self) -> Result<Stat> {
        let info = self.conn.command(&Command::Stat)?;
        parse_stat(&info)
    }

    /// Request the scan listing for one message.
    pub fn list(&mut self, msg: MessageId) -> Result<MessageInfo> {
        let info = self.conn.command(&Command::List(Some(msg)))?;
        parse_list_entry(&info)
    }

    /// Request the scan listing for every message in the maildrop, in
    /// server order.
    ///
    /// A malformed listing line aborts the whole call; no partial listing is
    /// returned.
    pub fn list_all(&mut self) -> Result<Vec<MessageInfo>> {
        self.conn.command(&Command::List(None))?;
        let lines = self.conn.read_body_lines()?;
        lines.iter().map(|line| parse_list_entry(line)).collect()
    }

    /// Download a message as raw RFC 822 octets with CRLF line endings.
    ///
    /// The protocol's terminating dot is consumed here and never part of the
    /// result, and byte-stuffed leading dots are unstuffed; a decoder handed
    /// the returned buffer cannot read past the end of the message.
    pub fn retr(&mut self, msg: MessageId) -> Result<Vec<u8>> {
        self.conn.command(&Command::Retr(msg))?;
        self.conn.read_body_raw()
    }

    /// Download a message and hand it to `decoder` for structuring.
    pub fn retr_decoded<D: MessageDecoder>(
        &mut self,
        msg: MessageId,
        decoder: &mut D,
    ) -> Result<D::Message> {
        let raw = self.retr(msg)?;
        decoder.decode(&raw).map_err(|e| Error::Decode(e.into()))
    }

    /// Mark a message as deleted.
    ///
    /// The server only removes marked messages when [`Session::quit`] ends
    /// the session; [`Session::rset`] reverses the marks until then.
    pub fn dele(&mut self, msg: MessageId) -> Result<()> {
        self.conn.command(&Command::Dele(msg)).map(|_| ())
    }

    /// Do nothing, successfully.
    pub fn noop(&mut self) -> Result<()> {
        self.conn.command(&Command::Noop).map(|_| ())
    }

    /// Unmark every message marked as deleted in this session.
    pub fn rset(&mut self) -> Result<()> {
        self.conn.command(&Command::Rset).map(|_| ())
    }

    /// Download the headers of a message plus the first `lines` lines of its
    /// body, as raw octets with CRLF line endings.
    ///
    /// Sentinel and dot-stuffing handling match [`Session::retr`].
    pub fn top(&mut self, msg: MessageId, lines: u32) -> Result<Vec<u8>> {
        self.conn.command(&Command::Top(msg, lines))?;
        self.conn.read_body_raw()
    }

    /// Like [`Session::top`], handing the result to `decoder`.
    pub fn top_decoded<D: MessageDecoder>(
        &mut self,
        msg: MessageId,
        lines: u32,
        decoder: &mut D,
    ) -> Result<D::Message> {
        let raw = self.top(msg, lines)?;
        decoder.decode(&raw).map_err(|e| Error::Decode(e.into()))
    }

    /// Request the unique-id listing for one message.
    pub fn uidl(&mut self, msg: MessageId) -> Result<Uidl> {
        let info = self.conn.command(&Command::Uidl(Some(msg)))?;
        parse_uidl_entry(&info)
    }

    /// Request the unique-id listing for every message in the maildrop, in
    /// server order.
    pub fn uidl_all(&mut self) -> Result<Vec<Uidl>> {
        self.conn.command(&Command::Uidl(None))?;
        let lines = self.conn.read_body_lines()?;
        lines.iter().map(|line| parse_uidl_entry(line)).collect()
    }

    /// End the session.
    ///
    /// Sends `QUIT` and closes the connection without awaiting a reply,
    /// committing any pending deletions server-side.
    pub fn quit(mut self) -> Result<()> {
        self.conn.quit()
    }
}
