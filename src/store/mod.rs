//! Key-value preference storage
//!
//! Each record is persisted as one named group of typed values. Backends
//! implement [`PreferenceStore`]; a group commit is all-or-nothing.

pub mod file;
pub mod memory;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a preference backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("group '{0}' is unavailable")]
    Unavailable(String),
}

/// A single stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Long(i64),
}

/// Flat key to value mapping holding one record's fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefGroup {
    values: BTreeMap<String, PrefValue>,
}

impl PrefGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_long(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), PrefValue::Long(value));
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), PrefValue::Bool(value));
    }

    /// Read an integer, falling back to `default` when missing or mistyped
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(PrefValue::Long(v)) => *v,
            Some(other) => {
                warn!("Preference '{}' has unexpected value {:?}, using default", key, other);
                default
            }
            None => default,
        }
    }

    /// Read a boolean, falling back to `default` when missing or mistyped
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(PrefValue::Bool(v)) => *v,
            Some(other) => {
                warn!("Preference '{}' has unexpected value {:?}, using default", key, other);
                default
            }
            None => default,
        }
    }

    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// A persistent area made of independently committed named groups.
pub trait PreferenceStore: Send {
    /// Read a whole group. A group that was never committed reads as empty.
    fn read_group(&self, name: &str) -> Result<PrefGroup, StoreError>;

    /// Replace a whole group atomically.
    fn commit_group(&mut self, name: &str, group: &PrefGroup) -> Result<(), StoreError>;
}
