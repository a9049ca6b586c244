/// A pluggable SASL mechanism for [`Client::authenticate`](crate::Client::authenticate).
///
/// The client drives the `AUTH` exchange and handles the base64 layer; an
/// implementation only sees decoded challenges and produces raw responses.
pub trait Authenticator {
    /// The raw response to a challenge.
    type Response: AsRef<[u8]>;

    /// Process the server's decoded challenge and produce the response to
    /// send back.
    fn process(&self, challenge: &[u8]) -> Self::Response;
}
