use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
#[cfg(any(feature = "native-tls", feature = "rustls-tls"))]
use std::net::TcpStream;
use std::result;
use std::string::FromUtf8Error;

use bufstream::IntoInnerError as BufError;
#[cfg(feature = "native-tls")]
use native_tls::Error as TlsError;
#[cfg(feature = "native-tls")]
use native_tls::HandshakeError as TlsHandshakeError;
#[cfg(feature = "rustls-tls")]
use rustls_connector::HandshakeError as RustlsHandshakeError;

/// A convenience wrapper around `Result` for `pop3::Error`.
pub type Result<T> = result::Result<T, Error>;

/// A set of errors that can occur in the POP3 client.
#[derive(Debug)]
pub enum Error {
    /// An `io::Error` that occurred while trying to read or write to a network stream.
    Io(IoError),
    /// The underlying stream was closed gracefully before a full reply arrived.
    ///
    /// This is distinct from [`Error::Io`]: the peer shut the connection down
    /// in an orderly fashion rather than the transport failing mid-read.
    ConnectionLost,
    /// An error from the `native_tls` library during the TLS handshake.
    #[cfg(feature = "native-tls")]
    TlsHandshake(TlsHandshakeError<TcpStream>),
    /// An error from the `native_tls` library while managing the socket.
    #[cfg(feature = "native-tls")]
    Tls(TlsError),
    /// An error from the `rustls-connector` library during the TLS handshake.
    #[cfg(feature = "rustls-tls")]
    RustlsHandshake(RustlsHandshakeError<TcpStream>),
    /// A `-ERR` reply from the server, carrying the server's reason text
    /// (empty if the server gave none).
    ErrResponse(String),
    /// The server's greeting was missing or not a positive reply. The payload
    /// is the raw line the server sent instead.
    Greeting(String),
    /// Error parsing a server reply or listing line.
    Parse(ParseError),
    /// Error validating input data.
    Validate(ValidateError),
    /// The external message decoder rejected a retrieved message.
    Decode(Box<dyn StdError + Send + Sync>),
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error::Io(err)
    }
}

impl<T> From<BufError<T>> for Error {
    fn from(err: BufError<T>) -> Error {
        Error::Io(err.into())
    }
}

impl From<FromUtf8Error> for Error {
    fn from(err: FromUtf8Error) -> Error {
        Error::Parse(ParseError::DataNotUtf8(err))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Error {
        Error::Validate(err)
    }
}

#[cfg(feature = "native-tls")]
impl From<TlsHandshakeError<TcpStream>> for Error {
    fn from(err: TlsHandshakeError<TcpStream>) -> Error {
        Error::TlsHandshake(err)
    }
}

#[cfg(feature = "native-tls")]
impl From<TlsError> for Error {
    fn from(err: TlsError) -> Error {
        Error::Tls(err)
    }
}

#[cfg(feature = "rustls-tls")]
impl From<RustlsHandshakeError<TcpStream>> for Error {
    fn from(err: RustlsHandshakeError<TcpStream>) -> Error {
        Error::RustlsHandshake(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io: {}", e),
            Error::ConnectionLost => f.write_str("connection lost"),
            #[cfg(feature = "native-tls")]
            Error::TlsHandshake(e) => write!(f, "TLS handshake: {}", e),
            #[cfg(feature = "native-tls")]
            Error::Tls(e) => write!(f, "TLS: {}", e),
            #[cfg(feature = "rustls-tls")]
            Error::RustlsHandshake(e) => write!(f, "TLS handshake: {}", e),
            Error::ErrResponse(reason) if reason.is_empty() => {
                f.write_str("server responded with -ERR")
            }
            Error::ErrResponse(reason) => write!(f, "server responded with -ERR: {}", reason),
            Error::Greeting(line) => write!(f, "server did not greet with +OK: {:?}", line),
            Error::Parse(e) => write!(f, "parse: {}", e),
            Error::Validate(e) => write!(f, "validate: {}", e),
            Error::Decode(e) => write!(f, "decode: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            #[cfg(feature = "native-tls")]
            Error::TlsHandshake(e) => Some(e),
            #[cfg(feature = "native-tls")]
            Error::Tls(e) => Some(e),
            #[cfg(feature = "rustls-tls")]
            Error::RustlsHandshake(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Decode(e) => Some(&**e),
            _ => None,
        }
    }
}

/// An error parsing a server reply into the shape a command expects.
#[derive(Debug)]
pub enum ParseError {
    /// The reply line began with neither `+OK` nor `-ERR`.
    InvalidStatus(String),
    /// A positional field the command expects was missing from the line.
    MissingField {
        /// The offending line.
        line: String,
        /// Zero-based index of the missing field.
        field: usize,
    },
    /// A field was present but not a base-10 non-negative integer.
    InvalidNumber {
        /// The offending line.
        line: String,
        /// Zero-based index of the non-numeric field.
        field: usize,
    },
    /// The server's `AUTH` continuation challenge was not valid base64.
    Authentication(String),
    /// The server sent a line that is not valid UTF-8 where text was expected.
    DataNotUtf8(FromUtf8Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidStatus(line) => {
                write!(f, "reply is neither +OK nor -ERR: {:?}", line)
            }
            ParseError::MissingField { line, field } => {
                write!(f, "field {} missing from reply {:?}", field, line)
            }
            ParseError::InvalidNumber { line, field } => {
                write!(f, "field {} of reply {:?} is not a number", field, line)
            }
            ParseError::Authentication(line) => {
                write!(f, "invalid authentication challenge: {:?}", line)
            }
            ParseError::DataNotUtf8(e) => write!(f, "data is not UTF-8: {}", e),
        }
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ParseError::DataNotUtf8(e) => Some(e),
            _ => None,
        }
    }
}

/// Invalid character found in a command argument.
#[derive(Debug)]
pub struct ValidateError(pub char);

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // print character in debug form because invalid ones are often whitespaces
        write!(f, "invalid character in input: {:?}", self.0)
    }
}

impl StdError for ValidateError {}
