//! Scoped-list ownership and the configuration hierarchy resolver.
//!
//! # Data Flow
//! ```text
//! admin edit request (locationId?, backendId?, rewriteId?, fastcgiId?)
//!     → find_header_list / find_rewrite_list / find_fastcgi_list
//!     → walk Server → Location → {Rewrite | Fastcgi | Backend}
//!     → return the owning scope as a trait object, or a named
//!       "not found" error
//! ```
//!
//! # Design Decisions
//! - Five concrete scopes own header lists (server, location, backend,
//!   rewrite rule, fastcgi target); only server and location own rewrite
//!   and fastcgi lists
//! - Resolution priority: rewrite > fastcgi > backend > location > server;
//!   the first non-empty identifier category decides the branch
//! - A non-empty location id always scopes the lookup inside that location
//!   first; a missing location fails immediately, whatever the deeper id
//! - Resolvers are pure lookups: normalization happens at validation time,
//!   not inside finders

use crate::config::error::ConfigError;
use crate::config::schema::{
    BackendConfig, FastcgiConfig, HeaderConfig, LocationConfig, RewriteRule, ServerConfig,
};

/// A scope owning a response-header list.
pub trait HeaderListOwner: std::fmt::Debug {
    fn headers(&self) -> &[HeaderConfig];
    fn headers_mut(&mut self) -> &mut Vec<HeaderConfig>;
    fn ignore_headers(&self) -> &[String];
    fn ignore_headers_mut(&mut self) -> &mut Vec<String>;

    fn add_header(&mut self, header: HeaderConfig) {
        self.headers_mut().push(header);
    }

    fn add_ignore_header(&mut self, name: String) {
        self.ignore_headers_mut().push(name);
    }

    fn find_header(&self, header_id: &str) -> Option<&HeaderConfig> {
        self.headers().iter().find(|h| h.id == header_id)
    }

    fn delete_header(&mut self, header_id: &str) {
        self.headers_mut().retain(|h| h.id != header_id);
    }
}

/// A scope owning a rewrite-rule list.
pub trait RewriteListOwner: std::fmt::Debug {
    fn rewrite_rules(&self) -> &[RewriteRule];
    fn rewrite_rules_mut(&mut self) -> &mut Vec<RewriteRule>;

    fn add_rewrite_rule(&mut self, rule: RewriteRule) {
        self.rewrite_rules_mut().push(rule);
    }

    fn find_rewrite_rule(&self, rewrite_id: &str) -> Option<&RewriteRule> {
        self.rewrite_rules().iter().find(|r| r.id == rewrite_id)
    }

    fn find_rewrite_rule_mut(&mut self, rewrite_id: &str) -> Option<&mut RewriteRule> {
        self.rewrite_rules_mut()
            .iter_mut()
            .find(|r| r.id == rewrite_id)
    }

    fn delete_rewrite_rule(&mut self, rewrite_id: &str) {
        self.rewrite_rules_mut().retain(|r| r.id != rewrite_id);
    }
}

/// A scope owning a fastcgi-target list.
pub trait FastcgiListOwner: std::fmt::Debug {
    fn fastcgi_targets(&self) -> &[FastcgiConfig];
    fn fastcgi_targets_mut(&mut self) -> &mut Vec<FastcgiConfig>;

    fn add_fastcgi(&mut self, fastcgi: FastcgiConfig) {
        self.fastcgi_targets_mut().push(fastcgi);
    }

    fn find_fastcgi(&self, fastcgi_id: &str) -> Option<&FastcgiConfig> {
        self.fastcgi_targets().iter().find(|f| f.id == fastcgi_id)
    }

    fn find_fastcgi_mut(&mut self, fastcgi_id: &str) -> Option<&mut FastcgiConfig> {
        self.fastcgi_targets_mut()
            .iter_mut()
            .find(|f| f.id == fastcgi_id)
    }

    fn delete_fastcgi(&mut self, fastcgi_id: &str) {
        self.fastcgi_targets_mut().retain(|f| f.id != fastcgi_id);
    }
}

macro_rules! impl_header_list_owner {
    ($($ty:ty),+ $(,)?) => {$(
        impl HeaderListOwner for $ty {
            fn headers(&self) -> &[HeaderConfig] {
                &self.headers
            }

            fn headers_mut(&mut self) -> &mut Vec<HeaderConfig> {
                &mut self.headers
            }

            fn ignore_headers(&self) -> &[String] {
                &self.ignore_headers
            }

            fn ignore_headers_mut(&mut self) -> &mut Vec<String> {
                &mut self.ignore_headers
            }
        }
    )+};
}

macro_rules! impl_rewrite_list_owner {
    ($($ty:ty),+ $(,)?) => {$(
        impl RewriteListOwner for $ty {
            fn rewrite_rules(&self) -> &[RewriteRule] {
                &self.rewrite_rules
            }

            fn rewrite_rules_mut(&mut self) -> &mut Vec<RewriteRule> {
                &mut self.rewrite_rules
            }
        }
    )+};
}

macro_rules! impl_fastcgi_list_owner {
    ($($ty:ty),+ $(,)?) => {$(
        impl FastcgiListOwner for $ty {
            fn fastcgi_targets(&self) -> &[FastcgiConfig] {
                &self.fastcgi_targets
            }

            fn fastcgi_targets_mut(&mut self) -> &mut Vec<FastcgiConfig> {
                &mut self.fastcgi_targets
            }
        }
    )+};
}

impl_header_list_owner!(
    ServerConfig,
    LocationConfig,
    BackendConfig,
    RewriteRule,
    FastcgiConfig,
);
impl_rewrite_list_owner!(ServerConfig, LocationConfig);
impl_fastcgi_list_owner!(ServerConfig, LocationConfig);

impl ServerConfig {
    /// Resolve the most specific scope owning the header list addressed by
    /// the given identifiers.
    ///
    /// Priority: rewrite > fastcgi > backend > location > server. A
    /// non-empty `location_id` scopes the deeper lookup inside that
    /// location; with every identifier empty the server itself is the
    /// owner.
    pub fn find_header_list(
        &mut self,
        location_id: &str,
        backend_id: &str,
        rewrite_id: &str,
        fastcgi_id: &str,
    ) -> Result<&mut dyn HeaderListOwner, ConfigError> {
        if !rewrite_id.is_empty() {
            if !location_id.is_empty() {
                let location = self
                    .find_location_mut(location_id)
                    .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
                let rewrite = location
                    .find_rewrite_rule_mut(rewrite_id)
                    .ok_or_else(|| ConfigError::RewriteRuleNotFound(rewrite_id.to_string()))?;
                return Ok(rewrite as &mut dyn HeaderListOwner);
            }
            let rewrite = RewriteListOwner::find_rewrite_rule_mut(self, rewrite_id)
                .ok_or_else(|| ConfigError::RewriteRuleNotFound(rewrite_id.to_string()))?;
            return Ok(rewrite as &mut dyn HeaderListOwner);
        }

        if !fastcgi_id.is_empty() {
            if !location_id.is_empty() {
                let location = self
                    .find_location_mut(location_id)
                    .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
                let fastcgi = location
                    .find_fastcgi_mut(fastcgi_id)
                    .ok_or_else(|| ConfigError::FastcgiNotFound(fastcgi_id.to_string()))?;
                return Ok(fastcgi as &mut dyn HeaderListOwner);
            }
            let fastcgi = FastcgiListOwner::find_fastcgi_mut(self, fastcgi_id)
                .ok_or_else(|| ConfigError::FastcgiNotFound(fastcgi_id.to_string()))?;
            return Ok(fastcgi as &mut dyn HeaderListOwner);
        }

        if !backend_id.is_empty() {
            if !location_id.is_empty() {
                let location = self
                    .find_location_mut(location_id)
                    .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
                let backend = location
                    .find_backend_mut(backend_id)
                    .ok_or_else(|| ConfigError::BackendNotFound(backend_id.to_string()))?;
                return Ok(backend as &mut dyn HeaderListOwner);
            }
            let backend = self
                .find_backend_mut(backend_id)
                .ok_or_else(|| ConfigError::BackendNotFound(backend_id.to_string()))?;
            return Ok(backend as &mut dyn HeaderListOwner);
        }

        if !location_id.is_empty() {
            let location = self
                .find_location_mut(location_id)
                .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
            return Ok(location as &mut dyn HeaderListOwner);
        }

        Ok(self as &mut dyn HeaderListOwner)
    }

    /// Resolve the scope owning the rewrite-rule list: the location when
    /// `location_id` is non-empty, the server otherwise.
    pub fn find_rewrite_list(
        &mut self,
        location_id: &str,
    ) -> Result<&mut dyn RewriteListOwner, ConfigError> {
        if !location_id.is_empty() {
            let location = self
                .find_location_mut(location_id)
                .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
            return Ok(location as &mut dyn RewriteListOwner);
        }
        Ok(self as &mut dyn RewriteListOwner)
    }

    /// Resolve the scope owning the fastcgi list: the location when
    /// `location_id` is non-empty, the server otherwise.
    pub fn find_fastcgi_list(
        &mut self,
        location_id: &str,
    ) -> Result<&mut dyn FastcgiListOwner, ConfigError> {
        if !location_id.is_empty() {
            let location = self
                .find_location_mut(location_id)
                .ok_or_else(|| ConfigError::LocationNotFound(location_id.to_string()))?;
            return Ok(location as &mut dyn FastcgiListOwner);
        }
        Ok(self as &mut dyn FastcgiListOwner)
    }
}
