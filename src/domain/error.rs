use std::fmt;
use thiserror::Error;

/// Error type surfaced by the transport collaborator. The wire client is
/// external to this crate, so its failures arrive as boxed causes and are
/// kept intact for chained inspection.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// RosCom unified error type
#[derive(Error, Debug)]
pub enum RosComError {
    #[error("{operation}: {field} can't be empty")]
    Validation {
        operation: &'static str,
        field: &'static str,
    },

    #[error("router {address} is not connected")]
    NotConnected { address: String },

    #[error("{address}: {operation} failed")]
    Transport {
        address: String,
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to remove {} of {attempted} entries from list '{list}'", .failures.len())]
    PartialDelete {
        list: String,
        attempted: usize,
        failures: Vec<EntryFailure>,
    },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("unknown session '{id}'")]
    UnknownSession { id: String },

    #[error("maximum number of sessions ({max}) reached")]
    SessionLimit { max: usize },
}

pub type RosComResult<T> = Result<T, RosComError>;

/// One failed deletion inside a bulk reconciliation. The entry id is absent
/// when the reply row carried no identifier field at all.
#[derive(Debug)]
pub struct EntryFailure {
    pub id: Option<String>,
    pub cause: TransportError,
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}: {}", id, self.cause),
            None => write!(f, "<no id>: {}", self.cause),
        }
    }
}
