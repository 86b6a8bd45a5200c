//! Backend scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! validate() → engine.rs (rebuild primary pool under the lock)
//!
//! next_backend(options)
//!     → engine.rs (merge static options under caller options)
//!     → active algorithm:
//!         - random.rs (uniform pick, the default)
//!         - round_robin.rs (rotate through candidates)
//!         - weighted.rs (smooth weighted rotation)
//!         - hash.rs (consistent pick keyed by an option)
//!     → candidate, or promote to the backup tier and retry once
//! ```
//!
//! # Design Decisions
//! - One algorithm instance per server, rebuilt whenever the backend set or
//!   the algorithm choice changes; instances are never persisted
//! - Algorithms are looked up by string code in a static registry; an
//!   unknown code downgrades to random instead of failing
//! - Algorithm state is plain (no atomics): every call happens under the
//!   engine mutex
//! - An empty pool yields `None`, never an error; the proxying layer
//!   decides how to answer the request

pub mod engine;
pub mod hash;
pub mod random;
pub mod round_robin;
pub mod weighted;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::schema::BackendConfig;

/// Options handed to an algorithm at selection time: the server's static
/// scheduling options merged under the caller's per-request options (the
/// caller wins on duplicate keys).
pub type SchedulingOptions = HashMap<String, String>;

/// A pluggable backend-selection strategy.
///
/// The engine builds an instance, feeds it the schedulable backends of one
/// tier via [`add`](Self::add), calls [`start`](Self::start) once, then
/// asks for one candidate per request via [`next`](Self::next).
pub trait SchedulingAlgorithm: Send + fmt::Debug {
    /// Add a candidate to the pool.
    fn add(&mut self, backend: Arc<BackendConfig>);

    /// Hook invoked once after the pool is populated, before the first
    /// selection. Useful for pre-shuffling or weight normalization.
    fn start(&mut self) {}

    /// Return one candidate, or `None` when the pool is empty.
    fn next(&mut self, options: &SchedulingOptions) -> Option<Arc<BackendConfig>>;
}

/// Registry descriptor for one algorithm.
pub struct SchedulingType {
    /// Code stored in [`SchedulingConfig`](crate::SchedulingConfig).
    pub code: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Short description for the admin surface.
    pub description: &'static str,

    /// Builds a fresh, empty instance.
    pub factory: fn() -> Box<dyn SchedulingAlgorithm>,
}

/// Every known algorithm. The set is fixed at compile time, so lookups are
/// race-free without any registration step.
pub static SCHEDULING_TYPES: &[SchedulingType] = &[
    SchedulingType {
        code: "random",
        name: "Random",
        description: "uniformly random candidate per request",
        factory: || Box::new(random::RandomScheduling::new()),
    },
    SchedulingType {
        code: "round_robin",
        name: "Round Robin",
        description: "rotate through candidates in order",
        factory: || Box::new(round_robin::RoundRobinScheduling::new()),
    },
    SchedulingType {
        code: "weighted",
        name: "Weighted Round Robin",
        description: "rotate proportionally to backend weights",
        factory: || Box::new(weighted::WeightedScheduling::new()),
    },
    SchedulingType {
        code: "hash",
        name: "Hash",
        description: "consistent candidate for a given \"key\" option",
        factory: || Box::new(hash::HashScheduling::new()),
    },
];

/// Look up an algorithm by code. An unknown code returns `None` and is
/// treated as "no algorithm configured" by the engine.
pub fn find_scheduling_type(code: &str) -> Option<&'static SchedulingType> {
    SCHEDULING_TYPES.iter().find(|t| t.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert!(find_scheduling_type("random").is_some());
        assert!(find_scheduling_type("round_robin").is_some());
        assert!(find_scheduling_type("weighted").is_some());
        assert!(find_scheduling_type("hash").is_some());
        assert!(find_scheduling_type("does-not-exist").is_none());
        assert!(find_scheduling_type("").is_none());
    }

    #[test]
    fn test_factories_build_fresh_instances() {
        let kind = find_scheduling_type("round_robin").unwrap();
        let mut a = (kind.factory)();
        a.add(Arc::new(BackendConfig::new("127.0.0.1:8080")));
        a.start();
        assert!(a.next(&SchedulingOptions::new()).is_some());

        // A second instance must not share the first one's pool.
        let mut b = (kind.factory)();
        assert!(b.next(&SchedulingOptions::new()).is_none());
    }
}
