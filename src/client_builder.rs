use crate::{Client, Result};
use std::io::{Read, Write};
use std::net::TcpStream;

#[cfg(feature = "native-tls")]
use native_tls::{TlsConnector, TlsStream};
#[cfg(feature = "rustls-tls")]
use rustls_connector::{RustlsConnector, TlsStream as RustlsStream};

/// A convenience builder for [`Client`] structs over various encrypted transports.
///
/// Creating a [`Client`] using `native-tls` transport is straightforward:
#[cfg_attr(feature = "native-tls", doc = "```no_run")]
#[cfg_attr(not(feature = "native-tls"), doc = "```ignore")]
/// # use pop3::ClientBuilder;
/// # fn main() -> Result<(), pop3::Error> {
/// let client = ClientBuilder::new("pop.example.com", 995).native_tls()?;
/// # Ok(())
/// # }
/// ```
///
/// Similarly, if using the `rustls-tls` feature you can create a [`Client`] using rustls:
#[cfg_attr(feature = "rustls-tls", doc = "```no_run")]
#[cfg_attr(not(feature = "rustls-tls"), doc = "```ignore")]
/// # use pop3::ClientBuilder;
/// # fn main() -> Result<(), pop3::Error> {
/// let client = ClientBuilder::new("pop.example.com", 995).rustls()?;
/// # Ok(())
/// # }
/// ```
///
/// To upgrade a plaintext connection with `STLS` (usually port 110), call
/// `starttls()` before one of the [`Client`]-yielding functions:
#[cfg_attr(feature = "rustls-tls", doc = "```no_run")]
#[cfg_attr(not(feature = "rustls-tls"), doc = "```ignore")]
/// # use pop3::ClientBuilder;
/// # fn main() -> Result<(), pop3::Error> {
/// let client = ClientBuilder::new("pop.example.com", 110)
///     .starttls()
///     .rustls()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder<D>
where
    D: AsRef<str>,
{
    domain: D,
    port: u16,
    starttls: bool,
}

impl<D> ClientBuilder<D>
where
    D: AsRef<str>,
{
    /// Make a new `ClientBuilder` using the given domain and port.
    pub fn new(domain: D, port: u16) -> Self {
        ClientBuilder {
            domain,
            port,
            starttls: false,
        }
    }

    /// Use `STLS` for this connection: greet in plaintext, then upgrade to
    /// TLS before any credentials are sent.
    #[cfg(any(feature = "native-tls", feature = "rustls-tls"))]
    pub fn starttls(&mut self) -> &mut Self {
        self.starttls = true;
        self
    }

    /// Return a new [`Client`] using a `native-tls` transport.
    #[cfg(feature = "native-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "native-tls")))]
    pub fn native_tls(&mut self) -> Result<Client<TlsStream<TcpStream>>> {
        self.connect(|domain, tcp| {
            let ssl_conn = TlsConnector::builder().build()?;
            Ok(ssl_conn.connect(domain, tcp)?)
        })
    }

    /// Return a new [`Client`] using `rustls` transport.
    #[cfg(feature = "rustls-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rustls-tls")))]
    pub fn rustls(&mut self) -> Result<Client<RustlsStream<TcpStream>>> {
        self.connect(|domain, tcp| {
            let ssl_conn = RustlsConnector::new_with_native_certs()?;
            Ok(ssl_conn.connect(domain, tcp)?)
        })
    }

    /// Make a [`Client`] using a custom TLS initialization. This function is
    /// intended to be used if your TLS setup requires custom work such as
    /// adding private CAs or other specific TLS parameters.
    ///
    /// The `handshake` argument should accept two parameters:
    ///
    /// - domain: [`&str`]
    /// - tcp: [`TcpStream`]
    ///
    /// and yield a `Result<C>` where `C` is `Read + Write`. It should only
    /// perform TLS initialization over the given `tcp` socket and return the
    /// encrypted stream object, such as a [`native_tls::TlsStream`] or a
    /// [`rustls_connector::TlsStream`].
    ///
    /// If the caller is using `STLS` and previously called
    /// [`starttls`](Self::starttls), then the `tcp` socket given to the
    /// `handshake` function will have been through the greeting and the
    /// `STLS` exchange already, and the greeting will not be read a second
    /// time after the upgrade.
    ///
    /// ```no_run
    /// # use pop3::ClientBuilder;
    /// # fn main() -> Result<(), pop3::Error> {
    /// // a handshake that performs no encryption at all
    /// let client = ClientBuilder::new("pop.example.com", 110)
    ///     .connect(|_domain, tcp| Ok(tcp))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect<F, C>(&mut self, handshake: F) -> Result<Client<C>>
    where
        F: FnOnce(&str, TcpStream) -> Result<C>,
        C: Read + Write,
    {
        let domain = self.domain.as_ref();
        if self.starttls {
            let tcp = TcpStream::connect((domain, self.port))?;
            let mut client = Client::new(tcp);
            client.read_greeting()?;
            let tls = handshake(domain, client.stls_inner()?)?;
            Ok(Client::new(tls))
        } else {
            let tcp = TcpStream::connect((domain, self.port))?;
            let tls = handshake(domain, tcp)?;
            let mut client = Client::new(tls);
            client.read_greeting()?;
            Ok(client)
        }
    }
}
