//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! Host header
//!     → matcher.rs (match against each server's name patterns)
//!     → router.rs (first enabled matching server wins)
//!     → server.next_backend(...) picks the upstream target
//! ```
//!
//! # Design Decisions
//! - Exact pattern equality wins immediately; wildcard comparison only
//!   happens between names of equal segment count
//! - A wildcard match deliberately withholds the matched pattern; callers
//!   distinguish exact from wildcard matches by that
//! - No regex: matching is a per-segment scan, O(patterns × segments)

pub mod matcher;
pub mod router;

pub use matcher::{match_host_name, HostMatch};
pub use router::select_server;
