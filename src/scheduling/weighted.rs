//! Smooth weighted round-robin scheduling.
//!
//! Each candidate accumulates its weight per call; the highest accumulator
//! wins and is decremented by the pool's total weight. Over `total` calls a
//! candidate of weight `w` is selected exactly `w` times, without bursts.

use std::sync::Arc;

use crate::config::schema::BackendConfig;
use crate::scheduling::{SchedulingAlgorithm, SchedulingOptions};

#[derive(Debug)]
struct Candidate {
    backend: Arc<BackendConfig>,
    weight: i64,
    current: i64,
}

/// Weighted round-robin selector.
#[derive(Debug, Default)]
pub struct WeightedScheduling {
    candidates: Vec<Candidate>,
    total_weight: i64,
}

impl WeightedScheduling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingAlgorithm for WeightedScheduling {
    fn add(&mut self, backend: Arc<BackendConfig>) {
        // Weight 0 would starve the candidate forever.
        let weight = i64::from(backend.weight.max(1));
        self.total_weight += weight;
        self.candidates.push(Candidate {
            backend,
            weight,
            current: 0,
        });
    }

    fn start(&mut self) {
        for candidate in &mut self.candidates {
            candidate.current = 0;
        }
    }

    fn next(&mut self, _options: &SchedulingOptions) -> Option<Arc<BackendConfig>> {
        if self.candidates.is_empty() {
            return None;
        }

        let mut best = 0;
        for index in 0..self.candidates.len() {
            self.candidates[index].current += self.candidates[index].weight;
            if self.candidates[index].current > self.candidates[best].current {
                best = index;
            }
        }

        self.candidates[best].current -= self.total_weight;
        Some(self.candidates[best].backend.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::scheduling::SchedulingOptions;

    fn weighted_backend(address: &str, weight: u32) -> Arc<BackendConfig> {
        let mut backend = BackendConfig::new(address);
        backend.weight = weight;
        Arc::new(backend)
    }

    #[test]
    fn test_selection_is_proportional_to_weight() {
        let mut algorithm = WeightedScheduling::new();
        let heavy = weighted_backend("127.0.0.1:8080", 3);
        let light = weighted_backend("127.0.0.1:8081", 1);
        algorithm.add(heavy.clone());
        algorithm.add(light.clone());
        algorithm.start();

        let options = SchedulingOptions::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..8 {
            let picked = algorithm.next(&options).unwrap();
            *counts.entry(picked.id.clone()).or_default() += 1;
        }

        assert_eq!(counts[&heavy.id], 6);
        assert_eq!(counts[&light.id], 2);
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let mut algorithm = WeightedScheduling::new();
        assert!(algorithm.next(&SchedulingOptions::new()).is_none());
    }
}
