//! Round-robin scheduling.

use std::sync::Arc;

use crate::config::schema::BackendConfig;
use crate::scheduling::{SchedulingAlgorithm, SchedulingOptions};

/// Round-robin selector.
/// Keeps a cursor and rotates through the candidates in add order.
#[derive(Debug, Default)]
pub struct RoundRobinScheduling {
    candidates: Vec<Arc<BackendConfig>>,
    cursor: usize,
}

impl RoundRobinScheduling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingAlgorithm for RoundRobinScheduling {
    fn add(&mut self, backend: Arc<BackendConfig>) {
        self.candidates.push(backend);
    }

    fn start(&mut self) {
        self.cursor = 0;
    }

    fn next(&mut self, _options: &SchedulingOptions) -> Option<Arc<BackendConfig>> {
        if self.candidates.is_empty() {
            return None;
        }
        let backend = self.candidates[self.cursor % self.candidates.len()].clone();
        self.cursor = (self.cursor + 1) % self.candidates.len();
        Some(backend)
    }
}
