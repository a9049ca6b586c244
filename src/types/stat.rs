/// Aggregate drop listing for the whole maildrop, as returned by
/// [`Session::stat`](crate::Session::stat).
///
/// From section [5 of RFC 1939](https://tools.ietf.org/html/rfc1939#section-5):
///
/// > The positive response consists of "+OK" followed by a single space, the
/// > number of messages in the maildrop, a single space, and the size of the
/// > maildrop in octets.
///
/// Messages marked as deleted are not counted in either total. The server
/// recomputes this on every `STAT`; the client never caches it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stat {
    /// Number of messages currently in the maildrop.
    pub count: u32,
    /// Size of the maildrop in octets.
    pub size: u64,
}
