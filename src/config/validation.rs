//! Configuration validation.
//!
//! # Responsibilities
//! - Validate every sub-configuration of a server in a fixed order
//! - Rebuild the primary-tier scheduling pool once the backends are known
//!   to be valid
//! - Resolve the named cache policy into a concrete policy object
//! - Normalize self-healing defaults (weights, API sub-config) so that
//!   later lookups are pure reads
//!
//! # Design Decisions
//! - Short-circuits on the first failure; later checks assume earlier ones
//!   initialized required defaults
//! - An unknown scheduling code is a downgrade, not an error: the stored
//!   choice is cleared and the default algorithm takes over

use crate::cache::CachePolicyStore;
use crate::config::error::ConfigError;
use crate::config::schema::{
    ApiConfig, BackendConfig, FastcgiConfig, HeaderConfig, LocationConfig, RewriteRule,
    ServerConfig, SslConfig,
};

impl ServerConfig {
    /// Validate the whole server.
    ///
    /// Runs, in order: SSL, every backend, the primary-tier scheduling
    /// rebuild, every location, fastcgi targets, rewrite rules, headers,
    /// cache-policy resolution (only when a policy name is set), and the
    /// API sub-config (created when absent). Stops at the first failure.
    pub fn validate(&mut self, policies: &dyn CachePolicyStore) -> Result<(), ConfigError> {
        if let Some(ssl) = &self.ssl {
            ssl.validate()?;
        }

        for backend in &mut self.backends {
            backend.validate()?;
        }

        self.setup_scheduling(false);

        for location in &mut self.locations {
            location.validate()?;
        }

        for fastcgi in &mut self.fastcgi_targets {
            fastcgi.validate()?;
        }

        for rewrite in &mut self.rewrite_rules {
            rewrite.validate()?;
        }

        for header in &mut self.headers {
            header.validate()?;
        }

        if !self.cache_policy.is_empty() {
            let mut policy = policies
                .load(&self.cache_policy)
                .ok_or_else(|| ConfigError::CachePolicyNotFound(self.cache_policy.clone()))?;
            policy.validate()?;
            self.resolved_cache_policy = Some(policy);
        }

        let api = self.api.get_or_insert_with(ApiConfig::default);
        api.validate()?;

        Ok(())
    }
}

impl SslConfig {
    /// Presence checks only; certificate contents are validated by the SSL
    /// collaborator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.on {
            return Ok(());
        }
        if self.certificate.is_empty() {
            return Err(ConfigError::invalid("ssl", "certificate must not be empty"));
        }
        if self.certificate_key.is_empty() {
            return Err(ConfigError::invalid(
                "ssl",
                "certificate key must not be empty",
            ));
        }
        Ok(())
    }
}

impl BackendConfig {
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.address.is_empty() {
            return Err(ConfigError::invalid("backend", "address must not be empty"));
        }
        // Zero-weight backends would never be picked by weighted scheduling.
        if self.weight == 0 {
            self.weight = 1;
        }
        Ok(())
    }
}

impl LocationConfig {
    /// Validate the location and everything it owns.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        for backend in &mut self.backends {
            backend.validate()?;
        }
        for rewrite in &mut self.rewrite_rules {
            rewrite.validate()?;
        }
        for fastcgi in &mut self.fastcgi_targets {
            fastcgi.validate()?;
        }
        for header in &mut self.headers {
            header.validate()?;
        }
        Ok(())
    }
}

impl RewriteRule {
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::invalid("rewrite", "pattern must not be empty"));
        }
        Ok(())
    }
}

impl FastcgiConfig {
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.pass.is_empty() {
            return Err(ConfigError::invalid(
                "fastcgi",
                "pass address must not be empty",
            ));
        }
        Ok(())
    }
}

impl HeaderConfig {
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid("header", "name must not be empty"));
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.prefix.is_empty() {
            self.prefix = "/api".to_string();
        }
        Ok(())
    }
}
