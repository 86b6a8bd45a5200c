//! Post-load normalization, the decode/encode contract and display
//! ordering.
//!
//! Persistence is an external collaborator: it scans directories, reads
//! files and hands the core already-decoded servers. The core owns only
//! what happens after decoding — default assignment and a deterministic
//! display order — and the serde model the collaborator decodes into.

use crate::config::schema::{ApiConfig, ServerConfig};

/// Decode one server from its serialized form.
pub fn decode_server(raw: &str) -> Result<ServerConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Encode one server back to the same structure the decoder accepts.
pub fn encode_server(config: &ServerConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Post-load normalization: assign sub-configs a decoded server may lack.
///
/// Collection fields are already guaranteed non-nil by the serde defaults;
/// only the API sub-config needs explicit assignment.
pub fn normalize(config: &mut ServerConfig) {
    if config.api.is_none() {
        config.api = Some(ApiConfig::default());
    }
}

/// Transliterates human-readable text for ordering purposes.
///
/// Display ordering compares transliterated descriptions, so that servers
/// described in a non-Latin script sort deterministically alongside ASCII
/// ones. The actual transliteration is an external collaborator.
pub trait Transliterator {
    fn transliterate(&self, text: &str) -> String;
}

/// Passes text through unchanged. Sufficient for ASCII descriptions.
#[derive(Debug, Default)]
pub struct IdentityTransliterator;

impl Transliterator for IdentityTransliterator {
    fn transliterate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Order servers for display by their transliterated descriptions.
pub fn sort_by_description(servers: &mut [ServerConfig], transliterator: &dyn Transliterator) {
    servers.sort_by_cached_key(|s| transliterator.transliterate(&s.description));
}
