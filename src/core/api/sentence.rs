use std::fmt;

/// Command paths used against the device, preserved verbatim as the wire
/// contract.
pub const ADDRESS_LIST_ADD: &str = "/ip/firewall/address-list/add";
pub const ADDRESS_LIST_PRINT: &str = "/ip/firewall/address-list/print";
pub const ADDRESS_LIST_REMOVE: &str = "/ip/firewall/address-list/remove";
pub const ARP_PRINT: &str = "/ip/arp/print";

/// Reserved per-row identifier field in print replies.
pub const ID_FIELD: &str = ".id";
/// MAC address field in ARP table replies.
pub const MAC_ADDRESS_FIELD: &str = "mac-address";

/// One parameter word of a command sentence.
///
/// Attribute words (`=key=value`) set values on the command; query words
/// (`?key=value`) filter print-style commands to rows where the field equals
/// the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    Attribute { key: String, value: String },
    Query { key: String, value: String },
}

impl Word {
    /// Create an attribute word (`=key=value`)
    pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> Self {
        Word::Attribute {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a query filter word (`?key=value`)
    pub fn query(key: impl Into<String>, value: impl Into<String>) -> Self {
        Word::Query {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Encode the word the way it travels in a command sentence
    pub fn encode(&self) -> String {
        match self {
            Word::Attribute { key, value } => format!("={}={}", key, value),
            Word::Query { key, value } => format!("?{}={}", key, value),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
