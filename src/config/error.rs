//! Error types for configuration lookups and validation.
//!
//! Two failure classes exist: a scoped lookup that misses names the missing
//! scope (never silently defaulted), and a validation failure propagated
//! unchanged from the first failing sub-validator. An unknown scheduling
//! code and an empty backend pool are deliberately NOT errors — the former
//! downgrades to the default algorithm, the latter is an absent result.

use thiserror::Error;

/// Error type for the configuration core.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("location \"{0}\" not found")]
    LocationNotFound(String),

    #[error("backend \"{0}\" not found")]
    BackendNotFound(String),

    #[error("rewrite rule \"{0}\" not found")]
    RewriteRuleNotFound(String),

    #[error("fastcgi target \"{0}\" not found")]
    FastcgiNotFound(String),

    #[error("cache policy \"{0}\" not found")]
    CachePolicyNotFound(String),

    #[error("invalid {scope} configuration: {reason}")]
    Invalid {
        scope: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Shorthand for a validation failure in the named scope.
    pub(crate) fn invalid(scope: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            scope,
            reason: reason.into(),
        }
    }
}
