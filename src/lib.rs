//! RosCom Library
//!
//! MikroTik RouterOS firewall address-list management library providing
//! session lifecycle, list-membership reconciliation, and ARP lookups over
//! the RouterOS API. The wire protocol itself is an external collaborator
//! plugged in through the [`Dialer`] and [`ApiTransport`] traits.

pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::api::{ApiTransport, Dialer, Reply, ReplyEntry, Word};
pub use crate::core::session::{ArpLookup, Session, SessionManager, SessionSummary};
pub use crate::domain::config::{RosComConfig, RouterConfig};
pub use crate::domain::error::{EntryFailure, RosComError, RosComResult};
