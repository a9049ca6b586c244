use super::MessageId;

/// One entry of a scan listing, as returned by
/// [`Session::list`](crate::Session::list) and
/// [`Session::list_all`](crate::Session::list_all).
///
/// Pairs a session-local message number with the exact size of that message
/// in octets. The message number is only valid for the current session; see
/// [`MessageId`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MessageInfo {
    /// The message number of this message.
    pub id: MessageId,
    /// Size of the message in octets.
    pub size: u64,
}

/// One entry of a unique-id listing, as returned by
/// [`Session::uidl`](crate::Session::uidl) and
/// [`Session::uidl_all`](crate::Session::uidl_all).
///
/// From section [7 of RFC 1939](https://tools.ietf.org/html/rfc1939#section-7):
///
/// > The unique-id of a message is an arbitrary server-determined string,
/// > consisting of one to 70 characters in the range 0x21 to 0x7E, which
/// > uniquely identifies a message within a maildrop and which persists
/// > across sessions.
///
/// Unlike the message number, the unique-id is the identifier to use for
/// detecting messages already seen in an earlier session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Uidl {
    /// The message number of this message, local to the current session.
    pub id: MessageId,
    /// The server-determined unique-id, stable across sessions.
    pub uid: String,
}
