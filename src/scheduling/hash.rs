//! Hash scheduling: a consistent candidate for a given key.
//!
//! The key comes from the "key" entry of the merged options — typically the
//! client address or a session cookie value, supplied per request by the
//! caller. The same key always maps to the same candidate while the pool is
//! unchanged.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::schema::BackendConfig;
use crate::scheduling::{SchedulingAlgorithm, SchedulingOptions};

/// Option name holding the value to hash.
pub const KEY_OPTION: &str = "key";

/// Hash selector.
#[derive(Debug, Default)]
pub struct HashScheduling {
    candidates: Vec<Arc<BackendConfig>>,
}

impl HashScheduling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SchedulingAlgorithm for HashScheduling {
    fn add(&mut self, backend: Arc<BackendConfig>) {
        self.candidates.push(backend);
    }

    fn next(&mut self, options: &SchedulingOptions) -> Option<Arc<BackendConfig>> {
        if self.candidates.is_empty() {
            return None;
        }
        // Without a key there is nothing to be consistent over; degrade to
        // the first candidate rather than failing the request.
        let index = match options.get(KEY_OPTION) {
            Some(key) => {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                (hasher.finish() as usize) % self.candidates.len()
            }
            None => 0,
        };
        Some(self.candidates[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::SchedulingOptions;

    fn pool() -> HashScheduling {
        let mut algorithm = HashScheduling::new();
        for port in 8080..8084 {
            algorithm.add(Arc::new(BackendConfig::new(format!("127.0.0.1:{}", port))));
        }
        algorithm.start();
        algorithm
    }

    #[test]
    fn test_same_key_same_candidate() {
        let mut algorithm = pool();
        let mut options = SchedulingOptions::new();
        options.insert(KEY_OPTION.to_string(), "10.0.0.7".to_string());

        let first = algorithm.next(&options).unwrap();
        for _ in 0..20 {
            assert_eq!(algorithm.next(&options).unwrap().id, first.id);
        }
    }

    #[test]
    fn test_missing_key_degrades_to_first_candidate() {
        let mut algorithm = pool();
        let picked = algorithm.next(&SchedulingOptions::new()).unwrap();
        assert_eq!(picked.id, algorithm.candidates[0].id);
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let mut algorithm = HashScheduling::new();
        assert!(algorithm.next(&SchedulingOptions::new()).is_none());
    }
}
