use crate::core::api::sentence::ID_FIELD;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a query response, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyEntry {
    fields: HashMap<String, String>,
}

impl ReplyEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The reserved per-row identifier, used for delete-by-id commands
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD)
    }

    /// Iterate over all fields
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplyEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = ReplyEntry::new();
        for (name, value) in iter {
            entry.insert(name, value);
        }
        entry
    }
}

/// Structured reply to one command: an ordered sequence of result rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    entries: Vec<ReplyEntry>,
}

impl Reply {
    pub fn new(entries: Vec<ReplyEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ReplyEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ReplyEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ReplyEntry>> for Reply {
    fn from(entries: Vec<ReplyEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<ReplyEntry> for Reply {
    fn from_iter<I: IntoIterator<Item = ReplyEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
