//! This module contains types used throughout the POP3 protocol.

mod stat;
pub use self::stat::Stat;

mod listing;
pub use self::listing::{MessageInfo, Uidl};

/// From section [5 of RFC 1939](https://tools.ietf.org/html/rfc1939#section-5).
///
/// Messages in the maildrop are assigned message numbers as part of the scan
/// listing. A message number is a relative position from 1 to the number of
/// messages in the maildrop, fixed for the lifetime of the session: messages
/// marked as deleted are not renumbered, and no message is ever assigned the
/// number of a deleted message.
///
/// Message numbers are only meaningful within the session that produced them.
/// A client that needs to recognize a message across sessions must use the
/// unique-id listing (see [`Uidl`]) instead; unique-ids persist between
/// sessions, message numbers do not.
pub type MessageId = u32;
