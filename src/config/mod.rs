//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! decoded server (from the persistence collaborator)
//!     → loader.rs (normalize defaults, display ordering)
//!     → validation.rs (fixed-order semantic checks, scheduling rebuild,
//!       cache-policy resolution)
//!     → schema.rs (CRUD on names, listens, backends, locations)
//!     → scopes.rs (resolve which scope owns a header/rewrite/fastcgi list)
//! ```
//!
//! # Design Decisions
//! - The serde model IS the decode/encode contract; the on-disk grammar
//!   belongs to the persistence collaborator
//! - Validation short-circuits on the first failure and runs in a fixed
//!   order, since later checks consume defaults set by earlier ones
//! - Admin mutation takes `&mut self` and is serialized by the caller; the
//!   only internally synchronized state is the scheduling engine

pub mod error;
pub mod loader;
pub mod schema;
pub mod scopes;
pub mod validation;

pub use error::ConfigError;
pub use schema::{BackendConfig, LocationConfig, SchedulingConfig, ServerConfig};
pub use scopes::{FastcgiListOwner, HeaderListOwner, RewriteListOwner};
