//! Cache policy definitions and the policy store seam.
//!
//! A server references its cache policy by name; resolution happens during
//! validation through a [`CachePolicyStore`], which is the persistence
//! collaborator's seam. Policy file parsing lives behind that trait, not
//! here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// One cache policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Whether the policy is active.
    pub on: bool,

    /// Policy name; servers reference the policy by this.
    pub name: String,

    /// Cache key template (e.g. "${host}${requestURI}").
    pub key: String,

    /// Total capacity in bytes; 0 means unlimited.
    pub capacity: u64,

    /// Entry lifetime in seconds.
    pub life_secs: u64,

    /// Response statuses eligible for caching.
    pub status: Vec<u16>,

    /// Largest cacheable response in bytes; 0 means unlimited.
    pub max_size: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            on: true,
            name: String::new(),
            key: String::new(),
            capacity: 0,
            life_secs: 1800,
            status: Vec::new(),
            max_size: 0,
        }
    }
}

impl CachePolicy {
    /// Create an active policy.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    /// Check the policy and fill self-healing defaults.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::Invalid {
                scope: "cache policy",
                reason: "key must not be empty".to_string(),
            });
        }
        if self.status.is_empty() {
            self.status.push(200);
        }
        Ok(())
    }
}

/// Resolves cache policies by name.
///
/// Implemented by the persistence collaborator over whatever storage it
/// owns; [`MemoryPolicyStore`] is the in-process implementation the admin
/// surface and tests use.
pub trait CachePolicyStore {
    fn load(&self, name: &str) -> Option<CachePolicy>;
}

/// A policy store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryPolicyStore {
    policies: HashMap<String, CachePolicy>,
}

impl MemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a policy under its name.
    pub fn insert(&mut self, policy: CachePolicy) {
        self.policies.insert(policy.name.clone(), policy);
    }

    /// Remove a policy by name. Removing an unknown name is a no-op.
    pub fn remove(&mut self, name: &str) {
        self.policies.remove(name);
    }

    /// Find a policy by name.
    pub fn find(&self, name: &str) -> Option<&CachePolicy> {
        self.policies.get(name)
    }
}

impl CachePolicyStore for MemoryPolicyStore {
    fn load(&self, name: &str) -> Option<CachePolicy> {
        self.policies.get(name).cloned()
    }
}
