//! Random scheduling, the default strategy.
//!
//! Selection is locally stateless: each call picks uniformly among the
//! candidates with no memory of previous picks.

use std::sync::Arc;

use crate::config::schema::BackendConfig;
use crate::scheduling::{SchedulingAlgorithm, SchedulingOptions};

/// Uniform random selector.
#[derive(Debug, Default)]
pub struct RandomScheduling {
    candidates: Vec<Arc<BackendConfig>>,
}

impl RandomScheduling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingAlgorithm for RandomScheduling {
    fn add(&mut self, backend: Arc<BackendConfig>) {
        self.candidates.push(backend);
    }

    fn next(&mut self, _options: &SchedulingOptions) -> Option<Arc<BackendConfig>> {
        if self.candidates.is_empty() {
            return None;
        }
        let index = fastrand::usize(..self.candidates.len());
        Some(self.candidates[index].clone())
    }
}
