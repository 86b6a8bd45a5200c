//! Configuration schema definitions.
//!
//! The complete data model for one virtual server: routing names, listen
//! addresses, backends, path locations, the scheduling choice and the
//! scoped header/rewrite/fastcgi lists. All types derive Serde traits;
//! decoding and encoding this model is the contract with the persistence
//! collaborator, which owns the on-disk format.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::CachePolicy;
use crate::scheduling::engine::SchedulingEngine;

/// Generate an id for a newly created config object.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// One virtual server definition.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Whether this server accepts traffic.
    pub on: bool,

    /// Unique server id.
    pub id: String,

    /// Human-readable description, used for display ordering.
    pub description: String,

    /// Domain name patterns this server answers to (exact, or with `*`
    /// segments).
    pub name: Vec<String>,

    /// Listen addresses (e.g. "0.0.0.0:8080").
    pub listen: Vec<String>,

    /// Whether plain HTTP is served.
    pub http: bool,

    /// Content root directory.
    pub root: String,

    /// Default index files.
    pub index: Vec<String>,

    /// Response charset.
    pub charset: String,

    /// Upstream targets, primary and backup tiers mixed.
    pub backends: Vec<BackendConfig>,

    /// Scheduling algorithm choice and its options.
    pub scheduling: Option<SchedulingConfig>,

    /// Path-scoped override regions, in match order.
    pub locations: Vec<LocationConfig>,

    /// Access log settings.
    pub access_log: Vec<AccessLogConfig>,

    /// SSL settings.
    pub ssl: Option<SslConfig>,

    /// Name of the cache policy to resolve at validation time; empty means
    /// no caching.
    pub cache_policy: String,

    /// API sub-configuration, ensured present by `validate`.
    pub api: Option<ApiConfig>,

    /// Origin filename; empty for a newly created, unsaved server.
    pub filename: String,

    /// Server-scoped response headers.
    pub headers: Vec<HeaderConfig>,

    /// Upstream header names stripped at the server scope.
    pub ignore_headers: Vec<String>,

    /// Server-scoped rewrite rules.
    pub rewrite_rules: Vec<RewriteRule>,

    /// Server-scoped fastcgi targets.
    pub fastcgi_targets: Vec<FastcgiConfig>,

    /// Resolved policy object; set only by a successful `validate`.
    #[serde(skip)]
    pub(crate) resolved_cache_policy: Option<CachePolicy>,

    /// Runtime scheduling state; never persisted, fresh after clone.
    #[serde(skip)]
    pub(crate) scheduling_engine: SchedulingEngine,
}

impl ServerConfig {
    /// Create an enabled server with a fresh id and a default API
    /// sub-config.
    pub fn new() -> Self {
        Self {
            on: true,
            id: new_id(),
            api: Some(ApiConfig::default()),
            ..Self::default()
        }
    }

    /// Append a domain name pattern.
    pub fn add_name(&mut self, name: impl Into<String>) {
        self.name.push(name.into());
    }

    /// Append a listen address.
    pub fn add_listen(&mut self, address: impl Into<String>) {
        self.listen.push(address.into());
    }

    /// Append a backend target.
    pub fn add_backend(&mut self, backend: BackendConfig) {
        self.backends.push(backend);
    }

    /// Find a backend by id. Only the first match is addressable.
    pub fn find_backend(&self, backend_id: &str) -> Option<&BackendConfig> {
        self.backends.iter().find(|b| b.id == backend_id)
    }

    /// Mutable variant of [`find_backend`](Self::find_backend).
    pub fn find_backend_mut(&mut self, backend_id: &str) -> Option<&mut BackendConfig> {
        self.backends.iter_mut().find(|b| b.id == backend_id)
    }

    /// Remove a backend by id, preserving the order of survivors.
    /// Removing an unknown id is a no-op.
    pub fn delete_backend(&mut self, backend_id: &str) {
        self.backends.retain(|b| b.id != backend_id);
    }

    /// Append a path location.
    pub fn add_location(&mut self, location: LocationConfig) {
        self.locations.push(location);
    }

    /// Find a location by id.
    pub fn find_location(&self, location_id: &str) -> Option<&LocationConfig> {
        self.locations.iter().find(|l| l.id == location_id)
    }

    /// Mutable variant of [`find_location`](Self::find_location).
    pub fn find_location_mut(&mut self, location_id: &str) -> Option<&mut LocationConfig> {
        self.locations.iter_mut().find(|l| l.id == location_id)
    }

    /// Remove a location by id, preserving the order of survivors.
    /// Removing an unknown id is a no-op.
    pub fn remove_location(&mut self, location_id: &str) {
        self.locations.retain(|l| l.id != location_id);
    }

    /// The location at a list position, if any.
    pub fn location_at_index(&self, index: usize) -> Option<&LocationConfig> {
        self.locations.get(index)
    }

    /// The cache policy resolved by the last successful `validate`.
    pub fn cache_policy_object(&self) -> Option<&CachePolicy> {
        self.resolved_cache_policy.as_ref()
    }
}

/// One upstream target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Unique backend id within the owning server.
    pub id: String,

    /// Upstream address, host:port.
    pub address: String,

    /// Relative weight for weighted scheduling.
    pub weight: u32,

    /// Whether this backend may be scheduled.
    pub on: bool,

    /// Health state, set by an external health checker.
    pub is_down: bool,

    /// Tier marker: backup backends only receive traffic once the primary
    /// tier is exhausted.
    pub is_backup: bool,

    /// Backend-scoped response headers.
    pub headers: Vec<HeaderConfig>,

    /// Upstream header names stripped at the backend scope.
    pub ignore_headers: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            address: String::new(),
            weight: 1,
            on: true,
            is_down: false,
            is_backup: false,
            headers: Vec::new(),
            ignore_headers: Vec::new(),
        }
    }
}

impl BackendConfig {
    /// Create an enabled primary-tier backend with a fresh id.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            address: address.into(),
            ..Self::default()
        }
    }

    /// Whether the backend is schedulable at all (enabled and not marked
    /// down by the health checker).
    pub fn is_available(&self) -> bool {
        self.on && !self.is_down
    }
}

/// A path-scoped override region within a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Unique location id within the owning server.
    pub id: String,

    /// Whether this location is active.
    pub on: bool,

    /// Path pattern; an empty pattern matches every path.
    pub pattern: String,

    /// Content root override.
    pub root: String,

    /// Index file override.
    pub index: Vec<String>,

    /// Charset override.
    pub charset: String,

    /// Cache policy name override.
    pub cache_policy: String,

    /// Location-scoped backends; empty means the server's backends apply.
    pub backends: Vec<BackendConfig>,

    /// Location-scoped response headers.
    pub headers: Vec<HeaderConfig>,

    /// Upstream header names stripped at the location scope.
    pub ignore_headers: Vec<String>,

    /// Location-scoped rewrite rules.
    pub rewrite_rules: Vec<RewriteRule>,

    /// Location-scoped fastcgi targets.
    pub fastcgi_targets: Vec<FastcgiConfig>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            on: true,
            pattern: String::new(),
            root: String::new(),
            index: Vec::new(),
            charset: String::new(),
            cache_policy: String::new(),
            backends: Vec::new(),
            headers: Vec::new(),
            ignore_headers: Vec::new(),
            rewrite_rules: Vec::new(),
            fastcgi_targets: Vec::new(),
        }
    }
}

impl LocationConfig {
    /// Create an active location with a fresh id.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Append a location-scoped backend.
    pub fn add_backend(&mut self, backend: BackendConfig) {
        self.backends.push(backend);
    }

    /// Find a location-scoped backend by id.
    pub fn find_backend(&self, backend_id: &str) -> Option<&BackendConfig> {
        self.backends.iter().find(|b| b.id == backend_id)
    }

    /// Mutable variant of [`find_backend`](Self::find_backend).
    pub fn find_backend_mut(&mut self, backend_id: &str) -> Option<&mut BackendConfig> {
        self.backends.iter_mut().find(|b| b.id == backend_id)
    }
}

/// One URL rewrite rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Unique rule id within the owning scope.
    pub id: String,

    /// Whether this rule applies.
    pub on: bool,

    /// Match pattern.
    pub pattern: String,

    /// Replacement target.
    pub replace: String,

    /// Rule-scoped response headers.
    pub headers: Vec<HeaderConfig>,

    /// Upstream header names stripped at the rule scope.
    pub ignore_headers: Vec<String>,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            on: true,
            pattern: String::new(),
            replace: String::new(),
            headers: Vec::new(),
            ignore_headers: Vec::new(),
        }
    }
}

impl RewriteRule {
    /// Create an active rule with a fresh id.
    pub fn new(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            pattern: pattern.into(),
            replace: replace.into(),
            ..Self::default()
        }
    }
}

/// One fastcgi target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FastcgiConfig {
    /// Unique target id within the owning scope.
    pub id: String,

    /// Whether this target applies.
    pub on: bool,

    /// Fastcgi address, host:port or a unix socket path.
    pub pass: String,

    /// Parameters passed to the fastcgi server.
    pub params: HashMap<String, String>,

    /// Read timeout in seconds.
    pub read_timeout_secs: u64,

    /// Target-scoped response headers.
    pub headers: Vec<HeaderConfig>,

    /// Upstream header names stripped at the target scope.
    pub ignore_headers: Vec<String>,
}

impl Default for FastcgiConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            on: true,
            pass: String::new(),
            params: HashMap::new(),
            read_timeout_secs: 30,
            headers: Vec::new(),
            ignore_headers: Vec::new(),
        }
    }
}

impl FastcgiConfig {
    /// Create an active target with a fresh id.
    pub fn new(pass: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            pass: pass.into(),
            ..Self::default()
        }
    }
}

/// One response header entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Unique header entry id within the owning list.
    pub id: String,

    /// Whether this entry applies.
    pub on: bool,

    /// Header name.
    pub name: String,

    /// Header value.
    pub value: String,

    /// Apply regardless of response status.
    pub always: bool,

    /// Response statuses this entry applies to when not `always`.
    pub status: Vec<u16>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            on: true,
            name: String::new(),
            value: String::new(),
            always: false,
            status: Vec::new(),
        }
    }
}

impl HeaderConfig {
    /// Create an active entry with a fresh id.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}

/// Access log settings. Administrative only; the core never writes logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessLogConfig {
    /// Whether access logging is enabled.
    pub on: bool,

    /// Field names recorded per request.
    pub fields: Vec<String>,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            on: true,
            fields: Vec::new(),
        }
    }
}

/// SSL settings. Certificate contents are validated by an external
/// collaborator; the core checks presence only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SslConfig {
    /// Whether TLS is enabled.
    pub on: bool,

    /// Path to the certificate file (PEM).
    pub certificate: String,

    /// Path to the private key file (PEM).
    pub certificate_key: String,
}

/// API sub-configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Whether the API surface is enabled.
    pub on: bool,

    /// URL prefix the API answers under.
    pub prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            on: false,
            prefix: "/api".to_string(),
        }
    }
}

/// The chosen scheduling algorithm and its free-form options.
///
/// Options are passed through to the algorithm at selection time (e.g. a
/// hashing key or a session-affinity cookie value); the config itself holds
/// no runtime state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Registry code of the algorithm.
    pub code: String,

    /// Static options merged under caller options on every selection.
    pub options: HashMap<String, String>,
}
