//! In-memory directory of agent and service descriptions.
//!
//! Provides a thread-safe store that agents register descriptions with and
//! that answers queries by returning the matching keys.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::models::Description;
use crate::query::Query;

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Default)]
struct Entries {
    agents: HashMap<String, Description>,
    services: HashMap<String, Vec<Description>>,
}

/// Directory of agent and service descriptions.
///
/// Each key holds at most one agent description and any number of service
/// descriptions. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct ServiceDirectory {
    entries: Arc<RwLock<Entries>>,
    config: DirectoryConfig,
}

impl ServiceDirectory {
    /// Creates an empty directory with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty directory with the given configuration.
    pub fn with_config(config: DirectoryConfig) -> Self {
        Self { entries: Arc::default(), config }
    }

    /// The directory configuration.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>> {
        self.entries.read().map_err(|e| DirectoryError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Entries>> {
        self.entries.write().map_err(|e| DirectoryError::LockPoisoned(e.to_string()))
    }

    /// Registers the agent description for `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn register_agent(&self, key: impl Into<String>, description: Description) -> Result<()> {
        let key = key.into();
        debug!(key = %key, "Registering agent");
        self.write()?.agents.insert(key, description);
        Ok(())
    }

    /// Adds a service description under `key`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if duplicates are disallowed and the same
    /// description is already registered under `key`, or an error if lock is
    /// poisoned.
    pub fn register_service(&self, key: impl Into<String>, description: Description) -> Result<()> {
        let key = key.into();
        let mut entries = self.write()?;
        let services = entries.services.entry(key.clone()).or_default();

        if !self.config.allow_duplicate_services && services.contains(&description) {
            return Err(DirectoryError::AlreadyRegistered(key));
        }

        debug!(key = %key, count = services.len() + 1, "Registering service");
        services.push(description);
        Ok(())
    }

    /// Removes the agent description for `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no agent is registered under `key`, or an error
    /// if lock is poisoned.
    pub fn unregister_agent(&self, key: &str) -> Result<Description> {
        let removed = self.write()?.agents.remove(key);
        debug!(key, found = removed.is_some(), "Unregistering agent");
        removed.ok_or_else(|| DirectoryError::NotFound(key.to_string()))
    }

    /// Removes one service description from `key`. The key is dropped once
    /// its last service is removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key or the description is not registered,
    /// or an error if lock is poisoned.
    pub fn unregister_service(&self, key: &str, description: &Description) -> Result<()> {
        let mut entries = self.write()?;
        let services =
            entries.services.get_mut(key).ok_or_else(|| DirectoryError::NotFound(key.to_string()))?;
        let index = services
            .iter()
            .position(|registered| registered == description)
            .ok_or_else(|| DirectoryError::NotFound(format!("{key}: {description}")))?;

        services.remove(index);
        if services.is_empty() {
            entries.services.remove(key);
        }
        debug!(key, "Unregistered service");
        Ok(())
    }

    /// Keys of the agents whose description satisfies `query`, sorted.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn search_agents(&self, query: &Query) -> Result<Vec<String>> {
        let entries = self.read()?;
        let keys = entries
            .agents
            .iter()
            .filter(|(_, description)| query.check(description))
            .map(|(key, _)| key.clone())
            .collect();
        Ok(self.finish_search("agents", keys))
    }

    /// Keys holding at least one service description that satisfies
    /// `query`, sorted.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn search_services(&self, query: &Query) -> Result<Vec<String>> {
        let entries = self.read()?;
        let keys = entries
            .services
            .iter()
            .filter(|(_, descriptions)| descriptions.iter().any(|d| query.check(d)))
            .map(|(key, _)| key.clone())
            .collect();
        Ok(self.finish_search("services", keys))
    }

    fn finish_search(&self, scope: &'static str, mut keys: Vec<String>) -> Vec<String> {
        keys.sort_unstable();
        keys.dedup();
        let matched = keys.len();
        if let Some(limit) = self.config.max_results {
            keys.truncate(limit);
        }
        debug!(scope, matched, returned = keys.len(), "Search completed");
        keys
    }

    /// Number of registered agents.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn agent_count(&self) -> Result<usize> {
        Ok(self.read()?.agents.len())
    }

    /// Number of registered service descriptions across all keys.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn service_count(&self) -> Result<usize> {
        Ok(self.read()?.services.values().map(Vec::len).sum())
    }

    /// Removes every agent and service.
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.write()?;
        entries.agents.clear();
        entries.services.clear();
        Ok(())
    }
}
