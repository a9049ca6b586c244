use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, ParseError, Result};
use crate::types::{MessageInfo, Stat, Uidl};

lazy_static! {
    static ref STATUS: Regex = Regex::new(r"^(\+OK|-ERR)(?: (.*))?$").unwrap();
}

/// Classify a reply line as positive or negative.
///
/// Returns the text following `+OK` (possibly empty) on a positive reply.
/// A negative reply becomes [`Error::ErrResponse`] carrying the server's
/// reason text, and a line with neither marker is a
/// [`ParseError::InvalidStatus`]. Classification always happens before any
/// field of the reply is looked at.
pub(crate) fn parse_status(line: &str) -> Result<String> {
    let cap = match STATUS.captures(line) {
        Some(cap) => cap,
        None => return Err(Error::Parse(ParseError::InvalidStatus(line.to_string()))),
    };
    let info = cap.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
    if &cap[1] == "+OK" {
        Ok(info)
    } else {
        Err(Error::ErrResponse(info))
    }
}

/// Parse the drop listing from the text after `+OK` in a `STAT` reply.
pub(crate) fn parse_stat(line: &str) -> Result<Stat> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    Ok(Stat {
        count: number(line, &fields, 0)?,
        size: number(line, &fields, 1)?,
    })
}

/// Parse one scan listing entry, either from the text after `+OK` in a
/// `LIST msg` reply or from one body line of an argument-less `LIST`.
pub(crate) fn parse_list_entry(line: &str) -> Result<MessageInfo> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    Ok(MessageInfo {
        id: number(line, &fields, 0)?,
        size: number(line, &fields, 1)?,
    })
}

/// Parse one unique-id listing entry, either from the text after `+OK` in a
/// `UIDL msg` reply or from one body line of an argument-less `UIDL`.
pub(crate) fn parse_uidl_entry(line: &str) -> Result<Uidl> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let id = number(line, &fields, 0)?;
    let uid = fields.get(1).ok_or_else(|| ParseError::MissingField {
        line: line.to_string(),
        field: 1,
    })?;
    Ok(Uidl {
        id,
        uid: uid.to_string(),
    })
}

/// Extract field `field` of `line` as a base-10 non-negative integer.
///
/// A missing field or one that does not parse is a hard error; it is never
/// defaulted to zero.
fn number<T: FromStr>(line: &str, fields: &[&str], field: usize) -> Result<T> {
    let raw = fields.get(field).ok_or_else(|| ParseError::MissingField {
        line: line.to_string(),
        field,
    })?;
    raw.parse().map_err(|_| {
        Error::Parse(ParseError::InvalidNumber {
            line: line.to_string(),
            field,
        })
    })
}
