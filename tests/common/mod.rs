//! Shared builders for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Once;

use vhost_core::{BackendConfig, ServerConfig};

static INIT: Once = Once::new();

/// Initialize test logging once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// A primary-tier backend with a fixed id.
pub fn backend(id: &str, address: &str) -> BackendConfig {
    let mut backend = BackendConfig::new(address);
    backend.id = id.to_string();
    backend
}

/// A backup-tier backend with a fixed id.
pub fn backup_backend(id: &str, address: &str) -> BackendConfig {
    let mut backend = self::backend(id, address);
    backend.is_backup = true;
    backend
}

/// A server with the given backends, not yet scheduled.
pub fn server_with_backends(backends: Vec<BackendConfig>) -> ServerConfig {
    let mut server = ServerConfig::new();
    for backend in backends {
        server.add_backend(backend);
    }
    server
}

pub fn no_options() -> HashMap<String, String> {
    HashMap::new()
}
