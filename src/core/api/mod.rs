//! Consumed RouterOS API surface: command sentence words, structured
//! replies, and the transport seam the session layer drives.

pub mod reply;
pub mod sentence;
pub mod transport;

pub use reply::{Reply, ReplyEntry};
pub use sentence::{
    Word, ADDRESS_LIST_ADD, ADDRESS_LIST_PRINT, ADDRESS_LIST_REMOVE, ARP_PRINT, ID_FIELD,
    MAC_ADDRESS_FIELD,
};
pub use transport::{ApiTransport, Dialer, TransportResult};
