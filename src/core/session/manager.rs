use crate::core::api::{Dialer, ReplyEntry};
use crate::core::session::session::{ArpLookup, Session};
use crate::domain::config::RouterConfig;
use crate::domain::error::{RosComError, RosComResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct ManagedSession {
    name: String,
    session: Session,
}

/// Session manager for applications driving several routers at once.
///
/// Sessions are keyed by a generated handle; all operations on a handle are
/// serialized through the manager's lock, so sessions never see concurrent
/// callers.
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, ManagedSession>>>,
    dialer: Arc<dyn Dialer>,
    max_sessions: usize,
}

/// Session summary information
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub name: String,
    pub address: String,
    pub port: u16,
    pub connected: bool,
    pub local_id: i64,
    pub owner_id: i64,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(dialer: Arc<dyn Dialer>, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            dialer,
            max_sessions,
        }
    }

    /// Register a session for a configured router. The session starts
    /// disconnected; call `connect_session` to open its transport.
    pub async fn create_session(&self, config: &RouterConfig) -> RosComResult<String> {
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.max_sessions {
            return Err(RosComError::SessionLimit {
                max: self.max_sessions,
            });
        }

        let session_id = uuid::Uuid::new_v4().to_string();
        let session = Session::from_config(config, Arc::clone(&self.dialer));
        sessions.insert(
            session_id.clone(),
            ManagedSession {
                name: config.name.clone(),
                session,
            },
        );

        info!(%session_id, router = %config.name, "session created");
        Ok(session_id)
    }

    /// Open (or reopen) the transport of a registered session
    pub async fn connect_session(&self, session_id: &str) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.reconnect().await
    }

    /// Close the transport of a registered session, keeping the registration
    pub async fn disconnect_session(&self, session_id: &str) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.disconnect().await;
        Ok(())
    }

    /// Disconnect and drop a session
    pub async fn remove_session(&self, session_id: &str) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let mut managed = sessions
            .remove(session_id)
            .ok_or_else(|| RosComError::UnknownSession {
                id: session_id.to_string(),
            })?;

        managed.session.disconnect().await;
        info!(%session_id, router = %managed.name, "session removed");
        Ok(())
    }

    /// Add an IP to a named address-list on the given router
    pub async fn add_list_entry(
        &self,
        session_id: &str,
        list: &str,
        ip: &str,
    ) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.add_list_entry(list, ip).await
    }

    /// Remove one list-and-address pair on the given router
    pub async fn del_list_entry(
        &self,
        session_id: &str,
        list: &str,
        ip: &str,
    ) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.del_list_entry(list, ip).await
    }

    /// Remove every entry of a named address-list on the given router
    pub async fn del_list_entries(&self, session_id: &str, list: &str) -> RosComResult<()> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.del_list_entries(list).await
    }

    /// Query the entries of a named address-list on the given router
    pub async fn get_list_entries(
        &self,
        session_id: &str,
        list: &str,
    ) -> RosComResult<Vec<ReplyEntry>> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.get_list_entries(list).await
    }

    /// Look up a MAC address through the given router's ARP table
    pub async fn get_mac_by_ip(&self, session_id: &str, ip: &str) -> RosComResult<ArpLookup> {
        let mut sessions = self.sessions.write().await;
        let managed = Self::lookup(&mut sessions, session_id)?;
        managed.session.get_mac_by_ip(ip).await
    }

    /// List all registered sessions
    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.read().await;
        sessions
            .iter()
            .map(|(session_id, managed)| SessionSummary {
                session_id: session_id.clone(),
                name: managed.name.clone(),
                address: managed.session.address().to_string(),
                port: managed.session.port(),
                connected: managed.session.is_connected(),
                local_id: managed.session.local_id(),
                owner_id: managed.session.owner_id(),
            })
            .collect()
    }

    /// Disconnect every registered session
    pub async fn disconnect_all(&self) {
        let mut sessions = self.sessions.write().await;
        for (session_id, managed) in sessions.iter_mut() {
            debug!(%session_id, "disconnecting");
            managed.session.disconnect().await;
        }
    }

    /// Get session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Get maximum allowed sessions
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    fn lookup<'a>(
        sessions: &'a mut HashMap<String, ManagedSession>,
        session_id: &str,
    ) -> RosComResult<&'a mut ManagedSession> {
        sessions
            .get_mut(session_id)
            .ok_or_else(|| RosComError::UnknownSession {
                id: session_id.to_string(),
            })
    }
}
