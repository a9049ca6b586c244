//! POP3 client bindings for Rust.
//!
//! This crate implements the client side of the Post Office Protocol -
//! Version 3 as specified in [RFC 1939](https://tools.ietf.org/html/rfc1939):
//! the session handshake, the line-oriented command/reply exchange, and the
//! dot-terminated multi-line bodies behind message listings and downloads.
//!
//! The protocol's two client-side states get their own types: a [`Client`]
//! is a connection in the AUTHORIZATION state, and logging in turns it into
//! a [`Session`] in the TRANSACTION state, through which the maildrop is
//! read and managed. One command is outstanding at a time; every method
//! blocks until the full reply (and body, if any) has been read. Errors are
//! session-fatal: the crate never retries or resynchronizes, reconnecting is
//! the caller's job.
//!
//! # Usage
//!
//! Here is a basic example of using the client over plain TCP. See
//! [`ClientBuilder`] for the TLS variants.
//!
//! ```no_run
//! fn main() -> Result<(), pop3::Error> {
//!     let client = pop3::Client::connect(("pop.example.com", 110))?;
//!     let mut session = client.login("username", "password").map_err(|e| e.0)?;
//!
//!     let stat = session.stat()?;
//!     println!("{} messages, {} bytes total", stat.count, stat.size);
//!
//!     for info in session.list_all()? {
//!         let raw = session.retr(info.id)?;
//!         println!("message {} is {} bytes long", info.id, raw.len());
//!     }
//!
//!     session.quit()
//! }
//! ```
//!
//! Messages deleted with [`Session::dele`] are only removed once
//! [`Session::quit`] ends the session, and [`Session::rset`] un-marks them
//! all until then. Message numbers are meaningful only within one session;
//! use [`Session::uidl_all`] to recognize messages across sessions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod client_builder;
mod command;
mod error;
mod parse;
mod types;

mod authenticator;
mod decoder;

pub use crate::authenticator::Authenticator;
pub use crate::client::{Client, Connection, Session};
pub use crate::client_builder::ClientBuilder;
pub use crate::decoder::MessageDecoder;
pub use crate::error::{Error, ParseError, Result, ValidateError};
pub use crate::types::{MessageId, MessageInfo, Stat, Uidl};

#[cfg(test)]
mod mock_stream;
