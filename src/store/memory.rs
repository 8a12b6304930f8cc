//! In-process preference store

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{PrefGroup, PreferenceStore, StoreError};

/// Preference store kept entirely in memory.
///
/// Individual groups can be marked as failing, which makes reads or commits
/// of that group return [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: HashMap<String, PrefGroup>,
    failing_commits: HashSet<String>,
    failing_reads: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every commit of `name` fail
    pub fn fail_commits_for(&mut self, name: &str) {
        self.failing_commits.insert(name.to_string());
    }

    /// Make every read of `name` fail
    pub fn fail_reads_for(&mut self, name: &str) {
        self.failing_reads.insert(name.to_string());
    }

    /// Current contents of a group, if it was ever committed
    pub fn group(&self, name: &str) -> Option<&PrefGroup> {
        self.groups.get(name)
    }
}

impl PreferenceStore for MemoryStore {
    fn read_group(&self, name: &str) -> Result<PrefGroup, StoreError> {
        if self.failing_reads.contains(name) {
            return Err(StoreError::Unavailable(name.to_string()));
        }
        Ok(self.groups.get(name).cloned().unwrap_or_default())
    }

    fn commit_group(&mut self, name: &str, group: &PrefGroup) -> Result<(), StoreError> {
        if self.failing_commits.contains(name) {
            return Err(StoreError::Unavailable(name.to_string()));
        }
        debug!("Committing {} values to memory group '{}'", group.len(), name);
        self.groups.insert(name.to_string(), group.clone());
        Ok(())
    }
}
