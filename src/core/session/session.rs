use crate::core::api::{
    ApiTransport, Dialer, Reply, ReplyEntry, Word, ADDRESS_LIST_ADD, ADDRESS_LIST_PRINT,
    ADDRESS_LIST_REMOVE, ARP_PRINT, ID_FIELD, MAC_ADDRESS_FIELD,
};
use crate::domain::config::RouterConfig;
use crate::domain::error::{EntryFailure, RosComError, RosComResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of an ARP table lookup.
///
/// `mac` is present only when exactly one row matched the queried address;
/// `matches` carries the raw row count so callers can tell an ambiguous
/// lookup (2+ rows) apart from a genuine miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpLookup {
    pub matches: usize,
    pub mac: Option<String>,
}

/// Stateful handle to one remote router.
///
/// Owns the transport exclusively: the handle is `Some` iff the last connect
/// attempt succeeded, and it is closed-then-replaced on reconnect. Command
/// operations take `&mut self`, so one session serves one caller at a time;
/// concurrent use needs one session per task or external serialization.
pub struct Session {
    local_id: i64,
    owner_id: i64,
    username: String,
    password: String,
    address: String,
    port: u16,
    verbose: bool,
    dialer: Arc<dyn Dialer>,
    transport: Option<Box<dyn ApiTransport>>,
}

impl Session {
    /// Create an unconfigured, disconnected session
    pub fn new(dialer: Arc<dyn Dialer>) -> Self {
        Self {
            local_id: 0,
            owner_id: 0,
            username: String::new(),
            password: String::new(),
            address: String::new(),
            port: 0,
            verbose: false,
            dialer,
            transport: None,
        }
    }

    /// Create a session preconfigured from a router config entry
    pub fn from_config(config: &RouterConfig, dialer: Arc<dyn Dialer>) -> Self {
        Self {
            local_id: config.local_id,
            owner_id: config.owner_id,
            username: config.username.clone(),
            password: config.password.clone(),
            address: config.address.clone(),
            port: config.port,
            verbose: config.verbose,
            dialer,
            transport: None,
        }
    }

    pub fn set_local_id(&mut self, id: i64) {
        self.local_id = id;
    }

    pub fn local_id(&self) -> i64 {
        self.local_id
    }

    pub fn set_owner_id(&mut self, id: i64) {
        self.owner_id = id;
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Whether the last connect attempt succeeded. Does not probe the remote
    /// end; the peer may have gone away since.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Store credentials and endpoint, then open the transport
    pub async fn connect(
        &mut self,
        username: &str,
        password: &str,
        address: &str,
        port: u16,
    ) -> RosComResult<()> {
        self.username = username.to_string();
        self.password = password.to_string();
        self.address = address.to_string();
        self.port = port;
        self.open_transport().await
    }

    /// Re-run the connect sequence with the previously stored credentials
    /// and endpoint. Any prior handle is closed before it is replaced.
    pub async fn reconnect(&mut self) -> RosComResult<()> {
        self.open_transport().await
    }

    /// Close the transport if one is held. Safe to call repeatedly or
    /// before any connect.
    pub async fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.close().await {
                warn!(address = %self.address, error = %e, "transport close failed");
            }
            debug!(address = %self.address, "disconnected");
        }
    }

    /// Add an IP to a named firewall address-list
    pub async fn add_list_entry(&mut self, list: &str, ip: &str) -> RosComResult<()> {
        const OPERATION: &str = "add_list_entry";
        if list.is_empty() {
            return Err(RosComError::Validation {
                operation: OPERATION,
                field: "list",
            });
        }
        if ip.is_empty() {
            return Err(RosComError::Validation {
                operation: OPERATION,
                field: "ip",
            });
        }

        debug!(%list, %ip, "adding address-list entry");
        self.run(
            OPERATION,
            ADDRESS_LIST_ADD,
            &[Word::attribute("list", list), Word::attribute("address", ip)],
        )
        .await?;
        Ok(())
    }

    /// Remove every entry of a named address-list.
    ///
    /// The device has no delete-by-value primitive, so this queries the
    /// matching rows and deletes each one by its identifier. A failed
    /// per-entry delete never aborts the loop; all failures are aggregated
    /// into a `PartialDelete` error after the sweep completes.
    pub async fn del_list_entries(&mut self, list: &str) -> RosComResult<()> {
        const OPERATION: &str = "del_list_entries";
        if list.is_empty() {
            return Err(RosComError::Validation {
                operation: OPERATION,
                field: "list",
            });
        }

        let reply = self
            .run(OPERATION, ADDRESS_LIST_PRINT, &[Word::query("list", list)])
            .await?;
        self.remove_entries(list, reply).await
    }

    /// Remove the entries matching one list-and-address pair.
    ///
    /// Normally zero or one row matches, but duplicates are tolerated and
    /// all matches are deleted.
    pub async fn del_list_entry(&mut self, list: &str, ip: &str) -> RosComResult<()> {
        const OPERATION: &str = "del_list_entry";
        if list.is_empty() {
            return Err(RosComError::Validation {
                operation: OPERATION,
                field: "list",
            });
        }
        if ip.is_empty() {
            return Err(RosComError::Validation {
                operation: OPERATION,
                field: "ip",
            });
        }

        let reply = self
            .run(
                OPERATION,
                ADDRESS_LIST_PRINT,
                &[Word::query("list", list), Word::query("address", ip)],
            )
            .await?;
        self.remove_entries(list, reply).await
    }

    /// Query the entries of a named address-list as structured records
    pub async fn get_list_entries(&mut self, list: &str) -> RosComResult<Vec<ReplyEntry>> {
        let reply = self
            .run(
                "get_list_entries",
                ADDRESS_LIST_PRINT,
                &[Word::query("list", list)],
            )
            .await?;
        Ok(reply.into_entries())
    }

    /// Look up a MAC address through the device's ARP table
    pub async fn get_mac_by_ip(&mut self, ip: &str) -> RosComResult<ArpLookup> {
        let reply = self
            .run("get_mac_by_ip", ARP_PRINT, &[Word::query("address", ip)])
            .await?;

        let matches = reply.len();
        let mac = if matches == 1 {
            reply
                .entries()
                .first()
                .and_then(|entry| entry.get(MAC_ADDRESS_FIELD))
                .map(str::to_string)
        } else {
            None
        };

        Ok(ArpLookup { matches, mac })
    }

    fn endpoint(&self) -> String {
        if self.port == 0 {
            self.address.clone()
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }

    async fn open_transport(&mut self) -> RosComResult<()> {
        // Close-then-replace: a leftover handle must not leak
        if let Some(mut old) = self.transport.take() {
            if let Err(e) = old.close().await {
                warn!(address = %self.address, error = %e, "failed to close previous transport");
            }
        }

        let endpoint = self.endpoint();
        debug!(%endpoint, "connecting");
        let transport = self
            .dialer
            .dial(&endpoint, &self.username, &self.password)
            .await
            .map_err(|source| RosComError::Transport {
                address: self.address.clone(),
                operation: "connect",
                source,
            })?;

        self.transport = Some(transport);
        debug!(address = %self.address, "connected");
        Ok(())
    }

    async fn run(
        &mut self,
        operation: &'static str,
        command: &str,
        words: &[Word],
    ) -> RosComResult<Reply> {
        let address = self.address.clone();
        let transport = match self.transport.as_mut() {
            Some(transport) => transport,
            None => return Err(RosComError::NotConnected { address }),
        };

        let reply = transport
            .run(command, words)
            .await
            .map_err(|source| RosComError::Transport {
                address,
                operation,
                source,
            })?;

        if self.verbose {
            debug!(?reply, "command reply");
        }
        Ok(reply)
    }

    async fn remove_entries(&mut self, list: &str, reply: Reply) -> RosComResult<()> {
        let address = self.address.clone();
        let transport = match self.transport.as_mut() {
            Some(transport) => transport,
            None => return Err(RosComError::NotConnected { address }),
        };

        let attempted = reply.len();
        let mut failures = Vec::new();

        for entry in reply.into_entries() {
            let id = match entry.id() {
                Some(id) => id.to_string(),
                None => {
                    warn!(%list, "address-list row without an id field");
                    failures.push(EntryFailure {
                        id: None,
                        cause: "reply row missing .id field".into(),
                    });
                    continue;
                }
            };

            match transport
                .run(ADDRESS_LIST_REMOVE, &[Word::attribute(ID_FIELD, id.as_str())])
                .await
            {
                Ok(_) => debug!(%list, %id, "removed address-list entry"),
                Err(cause) => {
                    warn!(%list, %id, error = %cause, "failed to remove address-list entry");
                    failures.push(EntryFailure {
                        id: Some(id),
                        cause,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RosComError::PartialDelete {
                list: list.to_string(),
                attempted,
                failures,
            })
        }
    }
}
