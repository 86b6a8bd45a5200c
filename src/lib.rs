//! Virtual-host configuration and routing core.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                VHOST CORE                    │
//!                       │                                              │
//!   Host header ────────┼─▶ routing (match server by domain name)      │
//!                       │         │                                    │
//!                       │         ▼                                    │
//!   Request options ────┼─▶ scheduling (pick backend, primary→backup)  │
//!                       │         │                                    │
//!                       │         ▼                                    │
//!   Admin edits ────────┼─▶ config (scoped header/rewrite/fastcgi      │
//!                       │           lists, validation, CRUD)           │
//!                       │                                              │
//!                       │   cache (policy resolution by name)          │
//!                       └──────────────────────────────────────────────┘
//! ```
//!
//! The crate is decision logic only: the proxying layer (socket I/O, TLS,
//! connection pooling) and the persistence layer (config files, directory
//! scanning) are external collaborators that consume the surfaces exposed
//! here.

pub mod cache;
pub mod config;
pub mod routing;
pub mod scheduling;

pub use cache::{CachePolicy, CachePolicyStore, MemoryPolicyStore};
pub use config::error::ConfigError;
pub use config::schema::{
    BackendConfig, FastcgiConfig, HeaderConfig, LocationConfig, RewriteRule, SchedulingConfig,
    ServerConfig, SslConfig,
};
pub use config::scopes::{FastcgiListOwner, HeaderListOwner, RewriteListOwner};
pub use routing::matcher::HostMatch;
pub use scheduling::{SchedulingAlgorithm, SchedulingOptions};
