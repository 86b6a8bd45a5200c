//! The per-server scheduling engine: pool rebuilds and tier failover.
//!
//! # Responsibilities
//! - Own the active algorithm instance and the backup-mode flag
//! - Rebuild the pool whenever the backend set or the algorithm choice
//!   changes
//! - Promote to the backup tier, once, when the primary tier is exhausted
//!
//! # Design Decisions
//! - One mutex per server guards the algorithm pointer and the backup flag;
//!   `next` holds it for its entire body, including a potential
//!   promote-and-retry
//! - The lock contract is an explicit two-method split instead of a
//!   reentrant lock: `rebuild_locked` requires the guard and is the only
//!   path that touches the state, while the public entry points acquire it
//! - A new pool is fully populated and started before it is published, so
//!   concurrent readers see either the old instance or the new one, never a
//!   half-built one

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::schema::{BackendConfig, SchedulingConfig, ServerConfig};
use crate::scheduling::random::RandomScheduling;
use crate::scheduling::{find_scheduling_type, SchedulingAlgorithm, SchedulingOptions};

/// Runtime scheduling state of one server.
#[derive(Debug, Default)]
pub struct SchedulingEngine {
    state: Mutex<EngineState>,
}

#[derive(Debug, Default)]
struct EngineState {
    /// Active algorithm; `None` until the first rebuild.
    algorithm: Option<Box<dyn SchedulingAlgorithm>>,

    /// Whether the pool currently holds the backup tier.
    is_backup: bool,
}

impl Clone for SchedulingEngine {
    /// Runtime state is never cloned: a cloned server starts unscheduled
    /// and must be validated before serving traffic.
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl SchedulingEngine {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Discard the active algorithm and rebuild it for the given tier.
    pub(crate) fn rebuild(
        &self,
        scheduling: Option<&SchedulingConfig>,
        backends: &[BackendConfig],
        is_backup: bool,
    ) {
        let mut state = self.lock();
        Self::rebuild_locked(&mut state, scheduling, backends, is_backup);
    }

    /// Rebuild primitive. The caller must hold the state guard; this is the
    /// only way the promotion path inside [`next`](Self::next) can rebuild
    /// without deadlocking on its own lock.
    fn rebuild_locked(
        state: &mut EngineState,
        scheduling: Option<&SchedulingConfig>,
        backends: &[BackendConfig],
        is_backup: bool,
    ) {
        let (code, mut algorithm) = match scheduling.and_then(|s| find_scheduling_type(&s.code)) {
            Some(kind) => (kind.code, (kind.factory)()),
            None => (
                "random",
                Box::new(RandomScheduling::new()) as Box<dyn SchedulingAlgorithm>,
            ),
        };

        let mut candidates = 0usize;
        for backend in backends {
            if backend.is_available() && backend.is_backup == is_backup {
                algorithm.add(Arc::new(backend.clone()));
                candidates += 1;
            }
        }
        algorithm.start();

        tracing::debug!(
            algorithm = code,
            tier = if is_backup { "backup" } else { "primary" },
            candidates,
            "scheduling pool rebuilt"
        );

        state.algorithm = Some(algorithm);
        state.is_backup = is_backup;
    }

    /// Select one backend, promoting to the backup tier at most once.
    pub(crate) fn next(
        &self,
        scheduling: Option<&SchedulingConfig>,
        backends: &[BackendConfig],
        options: &SchedulingOptions,
    ) -> Option<Arc<BackendConfig>> {
        let mut state = self.lock();

        // Never set up: the server has not been validated yet.
        state.algorithm.as_ref()?;

        let merged = merged_options(scheduling, options);

        let candidate = state
            .algorithm
            .as_mut()
            .and_then(|algorithm| algorithm.next(&merged));
        if let Some(backend) = candidate {
            return Some(backend);
        }

        // There is no tier below backup.
        if state.is_backup {
            return None;
        }

        tracing::debug!("primary scheduling pool exhausted, switching to backup tier");
        Self::rebuild_locked(&mut state, scheduling, backends, true);
        state
            .algorithm
            .as_mut()
            .and_then(|algorithm| algorithm.next(&merged))
    }
}

/// Static scheduling options merged under the caller's options; the caller
/// wins on duplicate keys.
fn merged_options(
    scheduling: Option<&SchedulingConfig>,
    options: &SchedulingOptions,
) -> SchedulingOptions {
    let mut merged = scheduling.map(|s| s.options.clone()).unwrap_or_default();
    merged.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

impl ServerConfig {
    /// (Re)build the scheduling pool for one tier.
    ///
    /// An unrecognized algorithm code is cleared from the stored choice and
    /// the default random algorithm takes over; a corrupt scheduling choice
    /// must never stop the server from serving traffic.
    pub fn setup_scheduling(&mut self, is_backup: bool) {
        if let Some(config) = &self.scheduling {
            if find_scheduling_type(&config.code).is_none() {
                tracing::warn!(
                    server = %self.id,
                    code = %config.code,
                    "unknown scheduling algorithm, falling back to random"
                );
                self.scheduling = None;
            }
        }
        self.scheduling_engine
            .rebuild(self.scheduling.as_ref(), &self.backends, is_backup);
    }

    /// Select the backend for one request, or `None` when no tier has a
    /// schedulable backend. Safe to call from concurrent request threads.
    pub fn next_backend(&self, options: &SchedulingOptions) -> Option<Arc<BackendConfig>> {
        self.scheduling_engine
            .next(self.scheduling.as_ref(), &self.backends, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_caller_options_win_over_static_options() {
        let scheduling = SchedulingConfig {
            code: "hash".to_string(),
            options: HashMap::from([
                ("key".to_string(), "static".to_string()),
                ("other".to_string(), "kept".to_string()),
            ]),
        };
        let caller = HashMap::from([("key".to_string(), "caller".to_string())]);

        let merged = merged_options(Some(&scheduling), &caller);
        assert_eq!(merged["key"], "caller");
        assert_eq!(merged["other"], "kept");
    }

    #[test]
    fn test_no_static_options() {
        let caller = HashMap::from([("key".to_string(), "caller".to_string())]);
        let merged = merged_options(None, &caller);
        assert_eq!(merged["key"], "caller");
        assert_eq!(merged.len(), 1);
    }
}
