use crate::core::api::reply::Reply;
use crate::core::api::sentence::Word;
use crate::domain::error::TransportError;
use async_trait::async_trait;

pub type TransportResult<T> = Result<T, TransportError>;

/// A live, authenticated channel to one device.
///
/// The wire protocol itself (socket, framing, login) is owned by the
/// implementation; this crate only issues command sentences through it and
/// consumes structured replies.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue one command sentence with zero or more parameter words and
    /// return the device's reply
    async fn run(&mut self, command: &str, words: &[Word]) -> TransportResult<Reply>;

    /// Release the transport resource
    async fn close(&mut self) -> TransportResult<()>;
}

/// Opens and authenticates transports.
///
/// The endpoint is `"address"` or `"address:port"`; implementations supply
/// the protocol default port when none is given.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn dial(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> TransportResult<Box<dyn ApiTransport>>;
}
