use std::error::Error as StdError;
use std::result;

/// A collaborator that turns raw RFC 822 octets into a structured message.
///
/// [`Session::retr_decoded`](crate::Session::retr_decoded) and
/// [`Session::top_decoded`](crate::Session::top_decoded) hand a decoder the
/// fully reassembled message: dot-stuffing already undone, the protocol's
/// terminating sentinel already consumed. A decoder therefore operates on a
/// bounded buffer and can never read past the end of the message or disturb
/// the protocol stream.
///
/// Any `FnMut(&[u8]) -> Result<M, E>` closure is a decoder:
///
/// ```
/// use pop3::MessageDecoder;
///
/// let mut subject = |raw: &[u8]| -> Result<Option<String>, std::str::Utf8Error> {
///     Ok(std::str::from_utf8(raw)?
///         .lines()
///         .find_map(|l| l.strip_prefix("Subject: ").map(String::from)))
/// };
/// assert_eq!(
///     subject.decode(b"Subject: hello\r\n\r\nbody\r\n").unwrap(),
///     Some("hello".to_string())
/// );
/// ```
pub trait MessageDecoder {
    /// The structured message representation this decoder produces.
    type Message;
    /// The decoder's own failure type.
    type Error: Into<Box<dyn StdError + Send + Sync>>;

    /// Decode one complete message from its raw octets.
    fn decode(&mut self, raw: &[u8]) -> result::Result<Self::Message, Self::Error>;
}

impl<F, M, E> MessageDecoder for F
where
    F: FnMut(&[u8]) -> result::Result<M, E>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    type Message = M;
    type Error = E;

    fn decode(&mut self, raw: &[u8]) -> result::Result<M, E> {
        self(raw)
    }
}
